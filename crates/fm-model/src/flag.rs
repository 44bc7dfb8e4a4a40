use std::fmt;

use serde::{Deserialize, Serialize};

/// A flag passed through to the runner untouched.
///
/// Flags are order-significant and may repeat. A flag without a value is a bare switch
/// (e.g. `--legacy`); flags produced from `key=value` job tokens always carry one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Flag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn switch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Build a flag from a `key=value` pair.
    ///
    /// Single-character keys get one dash, longer keys get two: `b=cpu` is `-b cpu`,
    /// `ct=565` is `--ct 565`.
    pub fn from_pair(key: &str, value: &str) -> Self {
        let dashes = if key.chars().count() > 1 { "--" } else { "-" };
        Self::new(format!("{dashes}{key}"), value)
    }

    /// Split pre-rendered flag text such as `"--ct f16 --legacy"` into flags.
    ///
    /// A token starting with `-` opens a flag; the following token becomes its value
    /// unless it opens another flag.
    pub fn parse_all(text: &str) -> Vec<Flag> {
        let mut out: Vec<Flag> = Vec::new();
        for token in text.split_whitespace() {
            match out.last_mut() {
                Some(last) if last.value.is_none() && !token.starts_with('-') => {
                    last.value = Some(token.to_string());
                }
                _ => out.push(Flag::switch(token)),
            }
        }
        out
    }

    /// Append the command-line tokens for this flag.
    pub fn push_tokens(&self, out: &mut Vec<String>) {
        out.push(self.name.clone());
        if let Some(v) = &self.value {
            out.push(v.clone());
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{} {}", self.name, v),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_dash_count_follows_key_length() {
        assert_eq!(Flag::from_pair("a", "1"), Flag::new("-a", "1"));
        assert_eq!(Flag::from_pair("bb", "2"), Flag::new("--bb", "2"));
    }

    #[test]
    fn parse_all_pairs_values_and_keeps_switches() {
        let flags = Flag::parse_all("--ct 565 --legacy -b cpu");
        assert_eq!(
            flags,
            vec![
                Flag::new("--ct", "565"),
                Flag::switch("--legacy"),
                Flag::new("-b", "cpu"),
            ]
        );
    }

    #[test]
    fn parse_all_of_blank_is_empty() {
        assert!(Flag::parse_all("   ").is_empty());
    }

    #[test]
    fn tokens_skip_missing_value() {
        let mut out = Vec::new();
        Flag::switch("--skvm").push_tokens(&mut out);
        Flag::new("--tf", "2.2").push_tokens(&mut out);
        assert_eq!(out, vec!["--skvm", "--tf", "2.2"]);
    }
}
