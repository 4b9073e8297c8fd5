// Page hooks and surface tuning for the browser front-end.

// Element ids
pub const CANVAS_ID: &str = "flow-canvas";
pub const PANEL_MOUNT_ID: &str = "flow-controls"; // collapsible panel host
pub const INLINE_MOUNT_ID: &str = "flow-sandbox-mount"; // inline sandbox host

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Canvas sits behind the page and never takes input
pub const CANVAS_STYLE: &str =
    "position:fixed;inset:0;width:100vw;height:100vh;pointer-events:none;z-index:-10;display:block;";

// CPU fallback draws into a buffer this many times smaller than the canvas
pub const CPU_DOWNSCALE: u32 = 4;

// Widget markup classes
pub const WIDGET_CLASS: &str = "flow-widget";
pub const PANEL_OPEN_CLASS: &str = "is-open";
pub const SLIDER_ROW_CLASS: &str = "flow-slider";
pub const READOUT_CLASS: &str = "flow-readout";
pub const PRESET_CLASS: &str = "flow-preset";
pub const HINT_CLASS: &str = "flow-hint";
pub const TOGGLE_CLASS: &str = "flow-toggle";
