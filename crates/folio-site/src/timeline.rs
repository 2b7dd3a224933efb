//! Career timeline entries

/// Kind of timeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Employment
    Work,
    /// Studies
    Education,
}

impl EntryKind {
    /// Translation key of the group heading
    pub fn heading_key(self) -> &'static str {
        match self {
            Self::Work => "timeline.experience",
            Self::Education => "timeline.education",
        }
    }
}

/// One timeline entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Role or degree
    pub title: &'static str,
    /// Employer or institution
    pub organization: &'static str,
    /// City and country
    pub location: &'static str,
    /// Years covered
    pub period: &'static str,
    /// Technologies used
    pub technologies: &'static [&'static str],
    /// Entry kind
    pub kind: EntryKind,
}

/// Entries, most recent first
pub const TIMELINE: &[TimelineEntry] = &[
    TimelineEntry {
        title: "Full Stack Developer",
        organization: "Livepanel",
        location: "Bahía Blanca, Argentina",
        period: "2025 - Presente",
        technologies: &["Angular", "Python", "Django", "TypeScript"],
        kind: EntryKind::Work,
    },
    TimelineEntry {
        title: "Ingeniería en Sistemas de Información",
        organization: "Universidad Nacional del Sur",
        location: "Bahía Blanca, Argentina",
        period: "2020 - 2025",
        technologies: &["Java", "Python", "C", "SQL", "Git", "NextJS"],
        kind: EntryKind::Education,
    },
];
