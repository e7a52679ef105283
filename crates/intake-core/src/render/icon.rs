//! Section header icons.
//!
//! Icons are looked up by section title in a fixed table; titles that are not
//! in the table get the generic list icon.

use std::fmt;

/// Category icon shown in a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionIcon {
    User,
    Home,
    Church,
    PhoneAlt,
    InfoCircle,
    CheckShield,
    List,
}

impl SectionIcon {
    /// Resolve the icon for a section title.
    pub fn for_title(title: &str) -> Self {
        match title {
            "Personal Information" => SectionIcon::User,
            "Address Information" => SectionIcon::Home,
            "Church Information" => SectionIcon::Church,
            "Emergency Contact" => SectionIcon::PhoneAlt,
            "Additional Information" => SectionIcon::InfoCircle,
            "Consent" => SectionIcon::CheckShield,
            _ => SectionIcon::List,
        }
    }

    /// Icon-font name (Font Awesome naming).
    pub fn name(self) -> &'static str {
        match self {
            SectionIcon::User => "user",
            SectionIcon::Home => "home",
            SectionIcon::Church => "church",
            SectionIcon::PhoneAlt => "phone-alt",
            SectionIcon::InfoCircle => "info-circle",
            SectionIcon::CheckShield => "check-shield",
            SectionIcon::List => "list",
        }
    }

    /// Terminal-friendly glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            SectionIcon::User => "👤",
            SectionIcon::Home => "🏠",
            SectionIcon::Church => "⛪",
            SectionIcon::PhoneAlt => "📞",
            SectionIcon::InfoCircle => "ℹ",
            SectionIcon::CheckShield => "✅",
            SectionIcon::List => "📋",
        }
    }
}

impl fmt::Display for SectionIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
