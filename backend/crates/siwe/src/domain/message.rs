//! SIWE Message Model
//!
//! Canonical in-memory representation of an EIP-4361 message plus its
//! serialization to and from the plain-text signing format. `to_text`
//! is the single source of truth for the signed bytes: `parse` accepts
//! exactly the shapes `to_text` produces, so a round trip is
//! byte-for-byte stable.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::domain::value_objects::{EthAddress, Nonce};
use crate::error::{SiweError, SiweResult};

const HEADER_SUFFIX: &str = " wants you to sign in with your Ethereum account:";

/// Protocol version; the only value this implementation speaks
pub const VERSION: &str = "1";

/// Optional message fields (EIP-4361 §Message Fields)
///
/// Absent fields are omitted from the serialized text entirely, never
/// rendered as empty lines.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    pub statement: Option<String>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub not_before: Option<DateTime<Utc>>,
    pub request_id: Option<String>,
    pub resources: Vec<String>,
}

/// A Sign-In with Ethereum message
///
/// Immutable once constructed; `issued_at` is fixed at build time and
/// the signature is never part of the model — verification takes the
/// `(signed_text, signature)` pair separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiweMessage {
    /// RFC 3986 authority the user signs in to, no scheme
    pub domain: String,
    pub address: EthAddress,
    /// Full origin/resource URI the session is scoped to
    pub uri: String,
    /// Carried opaque; verification only requires presence
    pub chain_id: u64,
    pub nonce: Nonce,
    pub issued_at: DateTime<Utc>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub not_before: Option<DateTime<Utc>>,
    pub statement: Option<String>,
    pub request_id: Option<String>,
    pub resources: Vec<String>,
}

impl SiweMessage {
    /// Construct a message, validating every field
    ///
    /// Timestamps are truncated to whole seconds so that the canonical
    /// text (second-precision RFC 3339) parses back to the same value.
    pub fn new(
        domain: impl Into<String>,
        address: EthAddress,
        uri: impl Into<String>,
        chain_id: u64,
        nonce: Nonce,
        issued_at: DateTime<Utc>,
        options: MessageOptions,
    ) -> SiweResult<Self> {
        let domain = domain.into();
        let uri = uri.into();

        if domain.is_empty() || domain.contains("://") {
            return Err(SiweError::InvalidInput(
                "domain must be a bare authority without a URI scheme".to_string(),
            ));
        }
        if domain.contains(char::is_whitespace) {
            return Err(SiweError::InvalidInput(
                "domain must not contain whitespace".to_string(),
            ));
        }
        if uri.is_empty() || uri.contains('\n') {
            return Err(SiweError::InvalidInput(
                "uri must be a single non-empty line".to_string(),
            ));
        }
        if chain_id == 0 {
            return Err(SiweError::InvalidInput(
                "chain id must be a positive integer".to_string(),
            ));
        }
        if let Some(statement) = &options.statement {
            if statement.is_empty() || statement.contains('\n') || statement.contains('\r') {
                return Err(SiweError::InvalidInput(
                    "statement must be a single non-empty line".to_string(),
                ));
            }
        }
        if let Some(request_id) = &options.request_id {
            if request_id.is_empty() || request_id.contains('\n') {
                return Err(SiweError::InvalidInput(
                    "request id must be a single non-empty line".to_string(),
                ));
            }
        }
        for resource in &options.resources {
            if resource.is_empty() || resource.contains('\n') {
                return Err(SiweError::InvalidInput(
                    "resources must be single non-empty lines".to_string(),
                ));
            }
        }

        Ok(Self {
            domain,
            address,
            uri,
            chain_id,
            nonce,
            issued_at: issued_at.trunc_subsecs(0),
            expiration_time: options.expiration_time.map(|t| t.trunc_subsecs(0)),
            not_before: options.not_before.map(|t| t.trunc_subsecs(0)),
            statement: options.statement,
            request_id: options.request_id,
            resources: options.resources,
        })
    }

    /// Render the canonical EIP-4361 text form
    ///
    /// Fixed field order: header, address, statement block, URI,
    /// Version, Chain ID, Nonce, Issued At, then optional fields.
    /// Joined with `\n`, no trailing newline. These are the exact bytes
    /// the wallet signs.
    pub fn to_text(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!("{}{}", self.domain, HEADER_SUFFIX),
            self.address.to_checksum(),
            String::new(),
        ];

        if let Some(statement) = &self.statement {
            lines.push(statement.clone());
        }
        lines.push(String::new());

        lines.push(format!("URI: {}", self.uri));
        lines.push(format!("Version: {}", VERSION));
        lines.push(format!("Chain ID: {}", self.chain_id));
        lines.push(format!("Nonce: {}", self.nonce));
        lines.push(format!("Issued At: {}", format_timestamp(&self.issued_at)));

        if let Some(t) = &self.expiration_time {
            lines.push(format!("Expiration Time: {}", format_timestamp(t)));
        }
        if let Some(t) = &self.not_before {
            lines.push(format!("Not Before: {}", format_timestamp(t)));
        }
        if let Some(request_id) = &self.request_id {
            lines.push(format!("Request ID: {}", request_id));
        }
        if !self.resources.is_empty() {
            lines.push("Resources:".to_string());
            for resource in &self.resources {
                lines.push(format!("- {}", resource));
            }
        }

        lines.join("\n")
    }

    /// Parse the EIP-4361 text form, strictly
    ///
    /// Rejects anything `to_text` cannot have produced: wrong field
    /// order, empty lines where fields belong, unsupported version,
    /// non-canonical timestamps, trailing garbage.
    pub fn parse(text: &str) -> SiweResult<Self> {
        let lines: Vec<&str> = text.split('\n').collect();

        let domain = lines[0]
            .strip_suffix(HEADER_SUFFIX)
            .filter(|d| !d.is_empty())
            .ok_or(malformed("domain"))?
            .to_string();

        let address = lines
            .get(1)
            .and_then(|line| EthAddress::parse(line))
            .ok_or(malformed("address"))?;

        if lines.get(2) != Some(&"") {
            return Err(malformed("statement"));
        }

        // One empty line, optional statement line, one empty line
        let (statement, mut idx) = match lines.get(3) {
            Some(&"") => (None, 4),
            Some(line) => {
                if lines.get(4) != Some(&"") {
                    return Err(malformed("statement"));
                }
                (Some(line.to_string()), 5)
            }
            None => return Err(malformed("statement")),
        };

        let uri = required_value(&lines, &mut idx, "URI: ", "URI")?.to_string();
        if uri.is_empty() {
            return Err(malformed("URI"));
        }

        let version = required_value(&lines, &mut idx, "Version: ", "Version")?;
        if version != VERSION {
            return Err(malformed("Version"));
        }

        let chain_id_raw = required_value(&lines, &mut idx, "Chain ID: ", "Chain ID")?;
        let chain_id: u64 = chain_id_raw.parse().map_err(|_| malformed("Chain ID"))?;
        // no leading zeros or "+": text must re-render identically
        if chain_id == 0 || chain_id.to_string() != chain_id_raw {
            return Err(malformed("Chain ID"));
        }

        let nonce = Nonce::parse(required_value(&lines, &mut idx, "Nonce: ", "Nonce")?)
            .ok_or(malformed("Nonce"))?;

        let issued_at =
            parse_timestamp(required_value(&lines, &mut idx, "Issued At: ", "Issued At")?)
                .ok_or(malformed("Issued At"))?;

        let expiration_time = match optional_value(&lines, &mut idx, "Expiration Time: ") {
            Some(raw) => Some(parse_timestamp(raw).ok_or(malformed("Expiration Time"))?),
            None => None,
        };

        let not_before = match optional_value(&lines, &mut idx, "Not Before: ") {
            Some(raw) => Some(parse_timestamp(raw).ok_or(malformed("Not Before"))?),
            None => None,
        };

        let request_id = match optional_value(&lines, &mut idx, "Request ID: ") {
            Some(raw) if raw.is_empty() => return Err(malformed("Request ID")),
            Some(raw) => Some(raw.to_string()),
            None => None,
        };

        let mut resources = Vec::new();
        if lines.get(idx) == Some(&"Resources:") {
            idx += 1;
            while let Some(value) = optional_value(&lines, &mut idx, "- ") {
                if value.is_empty() {
                    return Err(malformed("Resources"));
                }
                resources.push(value.to_string());
            }
            if resources.is_empty() {
                return Err(malformed("Resources"));
            }
        }

        if idx != lines.len() {
            return Err(malformed("trailing content"));
        }

        Ok(Self {
            domain,
            address,
            uri,
            chain_id,
            nonce,
            issued_at,
            expiration_time,
            not_before,
            statement,
            request_id,
            resources,
        })
    }

    /// Invalid at or after `expiration_time`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time.is_some_and(|exp| now >= exp)
    }

    /// Invalid strictly before `not_before`
    pub fn is_not_yet_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.not_before.is_some_and(|nbf| now < nbf)
    }
}

/// Second-precision RFC 3339 UTC with `Z` suffix
pub(crate) fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a timestamp, accepting only the canonical rendering
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc);
    (format_timestamp(&parsed) == raw).then_some(parsed)
}

fn required_value<'a>(
    lines: &[&'a str],
    idx: &mut usize,
    prefix: &str,
    field: &'static str,
) -> SiweResult<&'a str> {
    let value = lines
        .get(*idx)
        .and_then(|line| line.strip_prefix(prefix))
        .ok_or(malformed(field))?;
    *idx += 1;
    Ok(value)
}

fn optional_value<'a>(lines: &[&'a str], idx: &mut usize, prefix: &str) -> Option<&'a str> {
    let value = lines.get(*idx)?.strip_prefix(prefix)?;
    *idx += 1;
    Some(value)
}

const fn malformed(field: &'static str) -> SiweError {
    SiweError::MalformedMessage { field }
}
