use std::fmt;

/// Network closet a UPS sits in, read from its location text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClosetType {
    Idf,
    Mdf,
    Unknown,
}

impl ClosetType {
    pub const ALL: [ClosetType; 3] = [ClosetType::Idf, ClosetType::Mdf, ClosetType::Unknown];

    /// `MDF` wins when a location mentions both.
    pub fn from_location(location: &str) -> Self {
        let upper = location.to_uppercase();
        if upper.contains("MDF") {
            ClosetType::Mdf
        } else if upper.contains("IDF") {
            ClosetType::Idf
        } else {
            ClosetType::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClosetType::Idf => "IDF",
            ClosetType::Mdf => "MDF",
            ClosetType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ClosetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contacts containing "noc" belong to the Network Operations Center.
pub fn is_noc_contact(contact: &str) -> bool {
    contact.trim().to_lowercase().contains("noc")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closet_from_location() {
        assert_eq!(ClosetType::from_location("MDF-3 Closet"), ClosetType::Mdf);
        assert_eq!(ClosetType::from_location("2nd Floor IDF"), ClosetType::Idf);
        assert_eq!(ClosetType::from_location("Server Room"), ClosetType::Unknown);
        assert_eq!(ClosetType::from_location("bldg a idf-2"), ClosetType::Idf);
        assert_eq!(ClosetType::from_location(""), ClosetType::Unknown);
    }

    #[test]
    fn test_mdf_checked_before_idf() {
        assert_eq!(ClosetType::from_location("IDF feed from MDF"), ClosetType::Mdf);
    }

    #[test]
    fn test_is_noc_contact() {
        assert!(is_noc_contact("NOC Team"));
        assert!(is_noc_contact("  east-noc "));
        assert!(!is_noc_contact("Jane O'Brien"));
        assert!(!is_noc_contact("UNASSIGNED"));
    }
}
