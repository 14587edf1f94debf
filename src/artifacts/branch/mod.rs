pub mod branch_name;
pub mod revision;

/// Rejects names git itself would refuse: leading dots, `..`, `.lock`,
/// control characters and revision syntax
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const PARENT_REGEX: &str = r"^(.+)\^$";
pub const ANCESTOR_REGEX: &str = r"^(.+)\~(\d*)$";

/// Branch created by `init` and assumed when HEAD is missing
pub const DEFAULT_BRANCH: &str = "main";
