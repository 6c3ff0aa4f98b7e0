use serde::{Deserialize, Serialize};
use std::fmt;

/// Work-mode status of a daily record.
///
/// `NoInput` is only ever produced when reading: it is the bucket for
/// records whose stored status is missing or unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "WFH")]
    Wfh,
    #[serde(rename = "WFO")]
    Wfo,
    #[serde(rename = "CUTI")]
    Cuti,
    #[serde(rename = "On-Site")]
    OnSite,
    #[serde(rename = "No Input")]
    NoInput,
}

impl Status {
    /// Statuses a user can submit, in display order.
    pub const WRITABLE: [Status; 4] = [Status::Wfh, Status::Wfo, Status::Cuti, Status::OnSite];

    pub fn label(&self) -> &'static str {
        match self {
            Status::Wfh => "WFH",
            Status::Wfo => "WFO",
            Status::Cuti => "CUTI",
            Status::OnSite => "On-Site",
            Status::NoInput => "No Input",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }

    /// Convert DB string → enum. Anything unknown falls into `NoInput`.
    pub fn from_db_str(s: Option<&str>) -> Self {
        match s {
            Some("WFH") => Status::Wfh,
            Some("WFO") => Status::Wfo,
            Some("CUTI") => Status::Cuti,
            Some("On-Site") => Status::OnSite,
            _ => Status::NoInput,
        }
    }

    /// Helper: parse user input. Case, `-` and `_` are ignored; only
    /// writable statuses are accepted.
    pub fn from_input(s: &str) -> Option<Self> {
        let wanted = fold(s);
        Self::WRITABLE.into_iter().find(|st| fold(st.label()) == wanted)
    }

    pub fn is_writable(&self) -> bool {
        Self::WRITABLE.contains(self)
    }

    /// `WFH, WFO, CUTI or On-Site`
    pub fn writable_list() -> String {
        let labels: Vec<&str> = Self::WRITABLE.iter().map(Status::label).collect();
        match labels.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            _ => labels.join(""),
        }
    }
}

fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_case_insensitive() {
        assert_eq!(Status::from_input("Cuti"), Some(Status::Cuti));
        assert_eq!(Status::from_input("wfo"), Some(Status::Wfo));
        assert_eq!(Status::from_input("ON-SITE"), Some(Status::OnSite));
        assert_eq!(Status::from_input("onsite"), Some(Status::OnSite));
        assert_eq!(Status::from_input("No Input"), None);
        assert_eq!(Status::from_input("remote"), None);
    }

    #[test]
    fn only_the_four_real_statuses_are_writable() {
        assert!(Status::WRITABLE.iter().all(Status::is_writable));
        assert!(!Status::NoInput.is_writable());
        assert_eq!(Status::writable_list(), "WFH, WFO, CUTI or On-Site");
    }

    #[test]
    fn unknown_db_value_is_no_input() {
        assert_eq!(Status::from_db_str(Some("Cuti")), Status::NoInput);
        assert_eq!(Status::from_db_str(None), Status::NoInput);
        assert_eq!(Status::from_db_str(Some("On-Site")), Status::OnSite);
    }
}
