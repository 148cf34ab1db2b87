//! Content types an installer download may legitimately be served with.

/// Accepted `Content-Type` values for installer downloads.
pub const INSTALLER_CONTENT_TYPES: &[&str] = &[
    "application/exe",
    "application/octet-stream",
    "application/unknown", // Bintray
    "application/x-dosexec",
    "application/x-msdos-program",
    "application/x-msdownload",
    "application/x-msi",
    "application/x-sdlc", // Oracle
    "application/x-zip-compressed",
    "application/zip",
    "binary/octet-stream",
    "Composite Document File V2 Document, corrupt: Can't read SAT; charset=binary", // Google Code
    "text/x-python", // PIP
    "Zip Files",
    "application/x-ms-dos-executable", // OpenVPN
    "exe",                             // VPN Unlimited
    "",                                // PIA
    "text/plain; charset=ISO-8859-1",  // LibreOffice
    "text/html; charset=utf-8",        // SourceForge
    "application/x-ole-storage",       // EpicGames
    "application/x-troff-man",         // MSIs on OSDN
    "application/x-executable",        // Notepad++
];

/// A download host known to report a misleading content type.
#[derive(Debug, Clone, Copy)]
pub struct ContentTypeException {
    pub label: &'static str,
    pub url_suffix: Option<&'static str>,
    pub url_contains: Option<&'static str>,
    pub content_type: &'static str,
}

impl ContentTypeException {
    pub fn matches(&self, resource: &str, content_type: &str) -> bool {
        self.content_type == content_type
            && self.url_suffix.is_none_or(|suffix| resource.ends_with(suffix))
            && self.url_contains.is_none_or(|needle| resource.contains(needle))
    }
}

/// Hosts whose content type is accepted despite not being in the allow-list.
pub const CONTENT_TYPE_EXCEPTIONS: &[ContentTypeException] = &[
    ContentTypeException {
        label: "VirtualBox Extension Pack is served as plain text",
        url_suffix: Some(".vbox-extpack"),
        url_contains: None,
        content_type: "text/plain",
    },
    ContentTypeException {
        label: "Some LibreOffice mirrors serve MSIs as troff manuals",
        url_suffix: None,
        url_contains: Some("libreoffice"),
        content_type: "application/x-troff-man",
    },
];

/// Whether `content_type` is acceptable for `resource`.
pub fn is_allowed(resource: &str, content_type: &str, expected: &[String]) -> bool {
    expected.iter().any(|e| e == content_type)
        || CONTENT_TYPE_EXCEPTIONS
            .iter()
            .any(|exception| exception.matches(resource, content_type))
}

/// The default allow-list as owned strings.
pub fn installer_content_types() -> Vec<String> {
    INSTALLER_CONTENT_TYPES
        .iter()
        .map(|ct| ct.to_string())
        .collect()
}
