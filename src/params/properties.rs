use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static LINE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn line_pattern() -> &'static Regex {
    LINE_PATTERN.get_or_init(|| {
        // key (escaped separators allowed), then `=`, `:` or whitespace, then the value
        Regex::new(r"^((?:\\.|[^=:\s\\])+)(?:\s*[=:]\s*|\s+|$)(.*)$")
            .expect("Invalid properties line pattern")
    })
}

/// Flat string-keyed property bag, as read from a `.properties` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse property-file text.
    ///
    /// Supports `#`/`!` comment lines, `=`, `:` or whitespace separators,
    /// backslash line continuations and the usual escapes in keys and values
    /// (`\\`, `\=`, `\:`, `\t`, `\n`, `\uXXXX`, ...). Trailing unescaped
    /// whitespace is dropped from values. Later duplicates replace earlier
    /// ones. Lines that do not match the grammar are skipped.
    pub fn parse(content: &str) -> Self {
        let mut properties = Properties::new();
        let mut pending = String::new();

        for raw_line in content.lines() {
            let line = raw_line.trim_start();
            if pending.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
                continue;
            }

            if ends_with_continuation(line) {
                pending.push_str(&line[..line.len() - 1]);
                continue;
            }
            pending.push_str(line);

            let logical = std::mem::take(&mut pending);
            properties.insert_line(&logical);
        }

        if !pending.is_empty() {
            properties.insert_line(&pending);
        }

        properties
    }

    /// Read and parse a property file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PropertiesError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| PropertiesError::FileRead(path.display().to_string(), e.to_string()))?;
        let properties = Self::parse(&content);
        debug!("Loaded {} properties from {}", properties.len(), path.display());
        Ok(properties)
    }

    fn insert_line(&mut self, line: &str) {
        match line_pattern().captures(line) {
            Some(caps) => {
                let key = unescape(&caps[1]);
                let value = unescape(trim_unescaped_end(caps.get(2).map_or("", |m| m.as_str())));
                self.entries.insert(key, value);
            }
            None => debug!("Skipping unparsable property line"),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    trailing % 2 == 1
}

/// Trim trailing whitespace unless its first character is escaped.
fn trim_unescaped_end(value: &str) -> &str {
    let trimmed = value.trim_end();
    if trimmed.len() < value.len() && ends_with_continuation(trimmed) {
        let kept = value[trimmed.len()..].chars().next().map_or(0, char::len_utf8);
        &value[..trimmed.len() + kept]
    } else {
        trimmed
    }
}

fn unescape(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&escaped) = chars.get(i) else {
            break;
        };
        i += 1;

        match escaped {
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'f' => out.push('\u{c}'),
            'u' => match hex_unit(&chars[i..]) {
                Some(unit) => {
                    i += 4;
                    let mut units = vec![unit];
                    // high surrogate followed by an escaped low surrogate
                    if (0xD800..0xDC00).contains(&unit)
                        && chars.get(i) == Some(&'\\')
                        && chars.get(i + 1) == Some(&'u')
                    {
                        if let Some(low) = hex_unit(&chars[i + 2..]).filter(|u| (0xDC00..0xE000).contains(u)) {
                            units.push(low);
                            i += 6;
                        }
                    }
                    for decoded in char::decode_utf16(units) {
                        out.push(decoded.unwrap_or(char::REPLACEMENT_CHARACTER));
                    }
                }
                None => {
                    debug!("Malformed \\u escape in property line");
                    out.push('u');
                }
            },
            other => out.push(other),
        }
    }

    out
}

fn hex_unit(chars: &[char]) -> Option<u16> {
    let digits = chars.get(..4)?;
    if !digits.iter().all(char::is_ascii_hexdigit) {
        return None;
    }
    u16::from_str_radix(&digits.iter().collect::<String>(), 16).ok()
}

#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    #[error("Failed to read properties file '{0}': {1}")]
    FileRead(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_separators() {
        let properties = Properties::parse(
            "import.database.host=db1\n\
             import.database.port : 5433\n\
             import.database.username   admin\n",
        );

        assert_eq!(properties.get("import.database.host"), Some("db1"));
        assert_eq!(properties.get("import.database.port"), Some("5433"));
        assert_eq!(properties.get("import.database.username"), Some("admin"));
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let properties = Properties::parse(
            "# connection\n\
             ! legacy comment\n\
             \n\
             import.database.host = db1\n",
        );

        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("import.database.host"), Some("db1"));
    }

    #[test]
    fn test_parse_key_without_value() {
        let properties = Properties::parse("import.database.ssl\nimport.database.port=\n");

        assert!(properties.contains_key("import.database.ssl"));
        assert_eq!(properties.get("import.database.ssl"), Some(""));
        assert_eq!(properties.get("import.database.port"), Some(""));
    }

    #[test]
    fn test_parse_value_keeps_inner_separators() {
        let properties = Properties::parse("import.database.password = a=b:c d\n");
        assert_eq!(properties.get("import.database.password"), Some("a=b:c d"));
    }

    #[test]
    fn test_parse_line_continuation() {
        let properties = Properties::parse(
            "import.database.names = sales,\\\n    hr,\\\n    finance\n",
        );
        assert_eq!(properties.get("import.database.names"), Some("sales,hr,finance"));
    }

    #[test]
    fn test_parse_unescapes_backslash_and_separators() {
        let properties = Properties::parse(
            "import.database.username=CORP\\\\importer\n\
             import.database.password=p\\=w\\:x\n",
        );

        assert_eq!(properties.get("import.database.username"), Some("CORP\\importer"));
        assert_eq!(properties.get("import.database.password"), Some("p=w:x"));
    }

    #[test]
    fn test_parse_unescapes_unicode_and_control_characters() {
        let properties = Properties::parse(
            "import.database.host=caf\\u00e9\n\
             import.database.password=\\uD83D\\uDE00\\ttab\n\
             import.database.names=a\\nb\n",
        );

        assert_eq!(properties.get("import.database.host"), Some("café"));
        assert_eq!(properties.get("import.database.password"), Some("😀\ttab"));
        assert_eq!(properties.get("import.database.names"), Some("a\nb"));
    }

    #[test]
    fn test_parse_malformed_unicode_escape_keeps_text() {
        let properties = Properties::parse("import.database.host=\\u12zz\n");
        assert_eq!(properties.get("import.database.host"), Some("u12zz"));
    }

    #[test]
    fn test_parse_escaped_separator_in_key() {
        let properties = Properties::parse("odd\\=key\\ name=value\n");
        assert_eq!(properties.get("odd=key name"), Some("value"));
    }

    #[test]
    fn test_parse_keeps_escaped_trailing_space() {
        let properties = Properties::parse("import.database.password=secret\\ \n");
        assert_eq!(properties.get("import.database.password"), Some("secret "));
    }

    #[test]
    fn test_parse_later_duplicate_wins() {
        let properties = Properties::parse("import.database.host=a\nimport.database.host=b\n");
        assert_eq!(properties.get("import.database.host"), Some("b"));
    }

    #[test]
    fn test_from_iterator() {
        let properties: Properties = [("import.database.host", "db1")].into_iter().collect();
        assert_eq!(properties.get("import.database.host"), Some("db1"));
        assert!(!properties.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "import.database.host=filehost\n").unwrap();

        let properties = Properties::load(temp_file.path()).unwrap();
        assert_eq!(properties.get("import.database.host"), Some("filehost"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Properties::load("/nonexistent/import.properties");
        assert!(matches!(result.unwrap_err(), PropertiesError::FileRead(_, _)));
    }
}
