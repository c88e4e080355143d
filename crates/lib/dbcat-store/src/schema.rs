pub const SNAPSHOT_VERSION: u32 = 1;

pub const SNAPSHOT_TABLES: &str = "tables_metadata.json";
pub const SNAPSHOT_VIEWS: &str = "views_metadata.json";
pub const SNAPSHOT_COLUMNS: &str = "columns_metadata.json";
pub const SNAPSHOT_CONSTRAINTS: &str = "constraints_metadata.json";
pub const SNAPSHOT_INDEXES: &str = "indexes_metadata.json";
pub const SNAPSHOT_TRIGGERS: &str = "triggers_metadata.json";
pub const SNAPSHOT_SYNONYMS: &str = "synonyms_metadata.json";
pub const SNAPSHOT_PROCEDURES: &str = "procedures_metadata.json";
pub const SNAPSHOT_FUNCTIONS: &str = "functions_metadata.json";

pub const DEP_TYPE_PROCEDURE: &str = "PROCEDURE";
pub const DEP_TYPE_FUNCTION: &str = "FUNCTION";
pub const DEP_TYPE_TRIGGER: &str = "TRIGGER";

/// Recycle-bin objects carry this prefix and are excluded from
/// dependency resolution.
pub const RECYCLE_BIN_PREFIX: &str = "BIN$";

/// Owners whose objects are excluded from dependency resolution.
pub const SYSTEM_OWNERS: [&str; 2] = ["SYS", "SYSTEM"];
