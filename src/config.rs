//! Application-level configuration constants.

// UI Behavior
pub const DEBOUNCE_MS: u32 = 200;
pub const FIRST_ROW_INDEX: u64 = 1;

// Server endpoints
pub const ITEM_SUGGEST_PATH: &str = "/item-suggest/";
pub const ITEM_PAGE_PREFIX: &str = "/items/";

// Host page hooks
pub const MOUNT_ID: &str = "workers-form";
pub const WORKER_TYPE_ATTR: &str = "data-worker-type";
pub const SAVED_CONFIG_ID: &str = "worker-config";

// Default values for input fields
pub const DEFAULT_EXPORT_AMOUNT: &str = "64";

// Button labels
pub const ADD_LABEL: &str = "Add";
pub const DELETE_LABEL: &str = "Del";
pub const SELECT_LABEL: &str = "Sel";
pub const CANCEL_LABEL: &str = "Cancel";
