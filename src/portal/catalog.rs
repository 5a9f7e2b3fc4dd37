//! Static link catalogs, one per section.

use super::Section;

/// Display color family for a link entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkColor {
    Emerald,
    Yellow,
    Red,
}

/// Icon shown next to a link entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkIcon {
    Leaf,
    Droplets,
    Trees,
}

impl LinkIcon {
    /// Nerd Font glyph for the icon
    pub fn glyph(self) -> &'static str {
        match self {
            LinkIcon::Leaf => "\u{F032A}",     // md-leaf
            LinkIcon::Droplets => "\u{F058C}", // md-water
            LinkIcon::Trees => "\u{F0531}",    // md-tree
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkItem {
    pub name: &'static str,
    /// Company (PT) the form belongs to
    pub organization: &'static str,
    pub url: &'static str,
    pub color: LinkColor,
    /// Color of the organization label; falls back to dim text when absent
    pub secondary_color: Option<LinkColor>,
    pub icon: LinkIcon,
}

const HO_LINKS: [LinkItem; 3] = [
    LinkItem {
        name: "MOB HO APO",
        organization: "Anugerah Palm Oil",
        url: "https://script.google.com/macros/s/AKfycbyD9Uv9ZnhQqdxXFQOCWK14-EmO5QmrMrGfE1XIV4DYgHEY2ZmaNa5Ra2n1OtJqjPhJ/exec",
        color: LinkColor::Emerald,
        secondary_color: Some(LinkColor::Emerald),
        icon: LinkIcon::Leaf,
    },
    LinkItem {
        name: "MOB HO GON",
        organization: "Golden Oilindo Nusantara",
        url: "https://script.google.com/macros/s/AKfycbwR2gWd4rxc7WnOEcJh0uf1vQLBnT0xFSMkmGEHud-XbB4Ue_CFQfZ5B7p8zKQqr0X3/exec",
        color: LinkColor::Yellow,
        secondary_color: Some(LinkColor::Yellow),
        icon: LinkIcon::Droplets,
    },
    LinkItem {
        name: "MOB HO ASL",
        organization: "Anugerah Sawit Langgeng",
        url: "https://script.google.com/macros/s/AKfycbw-fZGR7HmpZxsZHkz-bfSpRC0uJrolRbYi0QxfhzCBzoLaGtslSSNONrrH3JKhKizVww/exec",
        color: LinkColor::Red,
        secondary_color: Some(LinkColor::Red),
        icon: LinkIcon::Trees,
    },
];

const PKS_LINKS: [LinkItem; 3] = [
    LinkItem {
        name: "MOB PKS GON",
        organization: "Golden Oilindo Nusantara",
        url: "https://script.google.com/macros/s/AKfycbwbR0mMuIQtyVrLBtpOnIGtroQ69WljGFs1l4Qc9e_PvocgNRvBYdtkunFkWOJKI5jN-w/exec",
        color: LinkColor::Yellow,
        secondary_color: Some(LinkColor::Yellow),
        icon: LinkIcon::Droplets,
    },
    LinkItem {
        name: "MOB PKS APO",
        organization: "Anugerah Palm Oil",
        url: "https://script.google.com/macros/s/AKfycby_1i8Z2A1RkEh9A55a_qBJll-lMmlqxStHLXRkzOD2OyObjqlRZbIT0EuY_jnyw4NY/exec",
        color: LinkColor::Emerald,
        secondary_color: Some(LinkColor::Emerald),
        icon: LinkIcon::Leaf,
    },
    LinkItem {
        name: "MOB PKS ASL",
        organization: "Anugerah Sawit Langgeng",
        url: "https://script.google.com/macros/s/AKfycbxqRGJc3rHwRfNTZakxz-tQNTwXnrM7-rI9K6iympm8LHfPpF1EBgJxNzawbgb3jpoiuA/exec",
        color: LinkColor::Red,
        secondary_color: Some(LinkColor::Red),
        icon: LinkIcon::Trees,
    },
];

/// Ordered catalog for a section
pub fn links_for(section: Section) -> &'static [LinkItem] {
    match section {
        Section::HeadOffice => &HO_LINKS,
        Section::Factory => &PKS_LINKS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<&str> = links_for(Section::HeadOffice).iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["MOB HO APO", "MOB HO GON", "MOB HO ASL"]);

        let names: Vec<&str> = links_for(Section::Factory).iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["MOB PKS GON", "MOB PKS APO", "MOB PKS ASL"]);
    }

    #[test]
    fn test_catalog_urls_are_absolute_https() {
        for section in Section::ALL {
            for link in links_for(section) {
                assert!(link.url.starts_with("https://"), "{} has a bad url", link.name);
            }
        }
    }

    #[test]
    fn test_icon_follows_color() {
        for section in Section::ALL {
            for link in links_for(section) {
                let expected = match link.color {
                    LinkColor::Emerald => LinkIcon::Leaf,
                    LinkColor::Yellow => LinkIcon::Droplets,
                    LinkColor::Red => LinkIcon::Trees,
                };
                assert_eq!(link.icon, expected);
            }
        }
    }
}
