//! System-wide default constants.
//!
//! Built-in values used when no `cnc_advisor.toml` overrides them.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Servers
// ============================================================================

/// Bind address of the defect diagnosis service.
pub const DIAGNOSIS_SERVER_ADDR: &str = "0.0.0.0:8001";

/// Bind address of the general chat service.
pub const CHAT_SERVER_ADDR: &str = "0.0.0.0:4002";

/// Endpoint the terminal test client talks to.
pub const CHAT_CONSOLE_URL: &str = "http://localhost:4002/api/chat";

// ============================================================================
// Hosted model
// ============================================================================

/// Base URL of the OpenAI-compatible chat-completion API.
pub const LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completion model used by both services.
pub const LLM_MODEL: &str = "gpt-4o-mini";

/// Upper bound on a single model call (seconds).
///
/// Matches the 90 s the dashboard waits for a diagnosis before giving up.
pub const LLM_TIMEOUT_SECS: u64 = 90;

/// Environment variable holding the API key.
pub const LLM_API_KEY_ENV: &str = "OPENAI_API_KEY";

// ============================================================================
// General chat
// ============================================================================

/// System instruction prepended to every chat conversation.
pub const CHAT_PERSONA: &str =
    "You are a natural, friendly chatbot. Keep the conversation relaxed and casual.";

/// Reply sent with HTTP 400 when the user message is blank.
pub const EMPTY_MESSAGE_REPLY: &str = "Sorry, your message was empty. Please type a question.";

/// Route tag reported by the chat endpoint.
pub const CHAT_ROUTE: &str = "GENERAL";

// ============================================================================
// Diagnosis tables
// ============================================================================

/// Historical `(sensor, mean, std_dev)` for the ten monitored channels.
pub const SENSOR_STATS: [(&str, f64, f64); 10] = [
    ("X_OutputCurrent", 326.895_875, 2.25),
    ("M_CURRENT_FEEDRATE", 18.425_237, 11.75),
    ("Y_OutputCurrent", 325.936_658, 3.00),
    ("S_ActualVelocity", 42.731_494, 13.875_75),
    ("S_OutputCurrent", 322.996_474, 6.25),
    ("S_SetVelocity", 42.382_763, 13.825),
    ("S_SetPosition", -105.221_758, 1072.5),
    ("S_ActualPosition", -105.538_962, 1072.738),
    ("Z_ActualPosition", 52.996_95, 23.375),
    ("Z_SetPosition", 52.994_572, 23.375),
];

/// `(group, priority, members)`; lower priority is evaluated first.
pub const SENSOR_GROUPS: [(&str, u32, &[&str]); 6] = [
    ("Axis Load", 3, &["X_OutputCurrent", "Y_OutputCurrent"]),
    ("Feed", 4, &["M_CURRENT_FEEDRATE"]),
    ("Z Axis", 6, &["Z_SetPosition", "Z_ActualPosition"]),
    ("Spindle RPM", 2, &["S_ActualVelocity", "S_SetVelocity"]),
    ("Spindle Load", 1, &["S_OutputCurrent"]),
    ("Spindle Position", 5, &["S_SetPosition", "S_ActualPosition"]),
];

/// Directional `(cause, effect, explanation)` rules between groups.
pub const CORRELATION_RULES: [(&str, &str, &str); 12] = [
    (
        "Axis Load",
        "Feed",
        "High axis load with a low feed rate points to rising cutting resistance or tool wear.",
    ),
    (
        "Feed",
        "Axis Load",
        "Low feed with high axis load means unbalanced cutting conditions that can set up process vibration.",
    ),
    (
        "Axis Load",
        "Z Axis",
        "Axis load changes together with Z-axis position drift suggest a change in cutting depth or a position compensation problem.",
    ),
    (
        "Z Axis",
        "Axis Load",
        "Z-axis jumps with fluctuating load point to an offset error or an unstable cutting depth.",
    ),
    (
        "Spindle RPM",
        "Spindle Load",
        "RPM and spindle load rising together suggest cutting overload or bearing wear.",
    ),
    (
        "Spindle Load",
        "Spindle RPM",
        "Rising spindle load with RPM fluctuation can come from poor chip evacuation or higher cutting resistance.",
    ),
    (
        "Spindle Position",
        "Z Axis",
        "Spindle and Z-axis positions jumping together point to an axis squareness problem or an offset compensation error.",
    ),
    (
        "Z Axis",
        "Spindle Position",
        "Simultaneous Z-axis and spindle position changes may indicate a position sensor or axis alignment problem.",
    ),
    (
        "Spindle RPM",
        "Spindle Position",
        "RPM changes with spindle position drift suggest spindle runout or vibration.",
    ),
    (
        "Spindle Position",
        "Spindle RPM",
        "An unstable spindle position with RPM spikes points to a bearing or alignment problem.",
    ),
    (
        "Feed",
        "Spindle Load",
        "Low feed with high spindle load carries a high risk of a cutting-resistance surge or tool wear.",
    ),
    (
        "Spindle Load",
        "Feed",
        "High spindle load with low feed means the cutting conditions do not match and load has built up.",
    ),
];
