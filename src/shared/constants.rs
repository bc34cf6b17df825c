/// Default page size for file listings
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum upload size in bytes (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Name of the cookie carrying the admin session token
pub const SESSION_COOKIE: &str = "edufiles_session";

// =============================================================================
// REFERENCE VOCABULARIES
// =============================================================================

/// Seeded subjects as (code, display name)
pub const SUBJECTS: &[(&str, &str)] = &[
    ("arabic", "اللغة العربية"),
    ("english", "اللغة الإنجليزية"),
    ("math", "الرياضيات"),
    ("biology", "الأحياء"),
    ("chemistry", "الكيمياء"),
    ("physics", "الفيزياء"),
    ("islamic", "التربية الإسلامية"),
];

/// Seeded grades as (code, display name)
pub const GRADES: &[(&str, &str)] = &[
    ("10", "الصف العاشر"),
    ("11", "الصف الحادي عشر"),
    ("12", "الصف الثاني عشر"),
];

/// Seeded semesters as (code, display name)
pub const SEMESTERS: &[(&str, &str)] = &[("1", "الفصل الأول"), ("2", "الفصل الثاني")];
