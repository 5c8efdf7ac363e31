//! Properties text parsing.

use serde::{Deserialize, Serialize};
use shadowkit_error::{PropertiesError, PropertiesErrorKind};
use std::collections::BTreeMap;

/// Key/value pairs read from a properties resource.
///
/// Later definitions of a key replace earlier ones.
///
/// # Examples
///
/// ```
/// use shadowkit_cache::ConfigProperties;
///
/// let text = "# defaults\nsdk = 33\nqualifiers: en-rUS \\\n    -land\n";
/// let properties = ConfigProperties::parse("shadowkit.properties", text).unwrap();
///
/// assert_eq!(properties.get("sdk"), Some("33"));
/// assert_eq!(properties.get("qualifiers"), Some("en-rUS -land"));
/// assert_eq!(properties.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigProperties {
    values: BTreeMap<String, String>,
}

impl ConfigProperties {
    /// Parse properties text.
    ///
    /// `resource` only names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`PropertiesErrorKind::Malformed`] for a `\u` escape that is not
    /// followed by four hex digits or that encodes an unpaired surrogate.
    pub fn parse(resource: &str, text: &str) -> Result<Self, PropertiesError> {
        let mut values = BTreeMap::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            values.insert(unescape(resource, key)?, unescape(resource, value)?);
        }
        Ok(Self { values })
    }

    /// Parse ISO-8859-1 encoded properties bytes.
    pub fn from_latin1(resource: &str, bytes: &[u8]) -> Result<Self, PropertiesError> {
        let text: String = bytes.iter().map(|&byte| char::from(byte)).collect();
        Self::parse(resource, &text)
    }

    /// Value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key`, or `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Whether `key` is defined.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are defined.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Split on `\n`, `\r\n` or a lone `\r`.
fn natural_lines(text: &str) -> impl Iterator<Item = &str> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    let text = text.strip_suffix('\r').unwrap_or(text);
    text.split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Join continued lines and drop blank and comment lines.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for natural in natural_lines(text) {
        let line = natural.trim_start_matches(is_blank);
        if current.is_none() && (line.is_empty() || line.starts_with(['#', '!'])) {
            continue;
        }

        let trailing_backslashes = line.chars().rev().take_while(|&c| c == '\\').count();
        let continues = trailing_backslashes % 2 == 1;
        let body = if continues {
            &line[..line.len() - 1]
        } else {
            line
        };

        let joined = current.get_or_insert_with(String::new);
        joined.push_str(body);
        if !continues {
            lines.extend(current.take());
        }
    }

    lines.extend(current);
    lines
}

/// Split a logical line into its raw key and raw value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = index;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches(is_blank);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_blank);
    }
    (key, rest)
}

fn unescape(resource: &str, raw: &str) -> Result<String, PropertiesError> {
    let malformed = |reason: String| {
        PropertiesError::new(PropertiesErrorKind::Malformed {
            resource: resource.to_string(),
            reason,
        })
    };

    let mut out = String::with_capacity(raw.len());
    let mut units: Vec<u16> = Vec::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            flush_units(&mut out, &mut units).map_err(&malformed)?;
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                let is_hex = digits.len() == 4 && digits.chars().all(|c| c.is_ascii_hexdigit());
                let unit = is_hex
                    .then(|| u16::from_str_radix(&digits, 16).ok())
                    .flatten()
                    .ok_or_else(|| malformed(format!("invalid \\u escape '\\u{digits}'")))?;
                units.push(unit);
            }
            Some(escaped) => {
                flush_units(&mut out, &mut units).map_err(&malformed)?;
                out.push(match escaped {
                    't' => '\t',
                    'n' => '\n',
                    'r' => '\r',
                    'f' => '\x0c',
                    other => other,
                });
            }
            None => {}
        }
    }

    flush_units(&mut out, &mut units).map_err(&malformed)?;
    Ok(out)
}

/// Decode pending `\u` code units, which may form surrogate pairs.
fn flush_units(out: &mut String, units: &mut Vec<u16>) -> Result<(), String> {
    if units.is_empty() {
        return Ok(());
    }
    for decoded in char::decode_utf16(units.drain(..)) {
        let c = decoded.map_err(|err| {
            format!("unpaired surrogate \\u{:04X}", err.unpaired_surrogate())
        })?;
        out.push(c);
    }
    Ok(())
}
