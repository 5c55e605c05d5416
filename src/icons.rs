//! Icon names used in project links, mapped to terminal glyphs.
//!
//! Names follow the Font Awesome component names the project documents are
//! written with (`FaGithub`, `FaGlobe`, ...).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    pub name: &'static str,
    pub glyph: &'static str,
    pub label: &'static str,
}

const ICONS: &[Icon] = &[
    Icon {
        name: "FaGithub",
        glyph: "◆",
        label: "GitHub",
    },
    Icon {
        name: "FaGitlab",
        glyph: "◇",
        label: "GitLab",
    },
    Icon {
        name: "FaGlobe",
        glyph: "◎",
        label: "Website",
    },
    Icon {
        name: "FaTwitter",
        glyph: "✕",
        label: "X",
    },
    Icon {
        name: "FaLinkedin",
        glyph: "▣",
        label: "LinkedIn",
    },
    Icon {
        name: "FaYoutube",
        glyph: "▶",
        label: "YouTube",
    },
    Icon {
        name: "FaNpm",
        glyph: "■",
        label: "npm",
    },
    Icon {
        name: "FaDocker",
        glyph: "▤",
        label: "Docker",
    },
    Icon {
        name: "FaAppStore",
        glyph: "▲",
        label: "App Store",
    },
    Icon {
        name: "FaGooglePlay",
        glyph: "▷",
        label: "Google Play",
    },
    Icon {
        name: "FaBook",
        glyph: "≡",
        label: "Docs",
    },
    Icon {
        name: "FaDownload",
        glyph: "↓",
        label: "Download",
    },
    Icon {
        name: "FaEnvelope",
        glyph: "✉",
        label: "Email",
    },
    Icon {
        name: "FaExternalLinkAlt",
        glyph: "↗",
        label: "Link",
    },
];

pub fn lookup(name: &str) -> Option<Icon> {
    ICONS.iter().find(|icon| icon.name == name).copied()
}
