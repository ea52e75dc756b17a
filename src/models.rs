use serde::{Deserialize, Serialize};
use std::fmt;

pub const WILDCARD: &str = "all";
pub const SHOW_ALL_GROUPS: &str = "show all";
pub const TOTAL_INTERACTIONS_GROUP: &str = "Total Interactions";

// ─── Channels ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "CS Landing Page")]
    CsLandingPage,
    #[serde(rename = "CS Homepage")]
    CsHomepage,
    #[serde(rename = "Help Pages")]
    HelpPages,
    #[serde(rename = "CS Chatbot")]
    CsChatbot,
    #[serde(rename = "CS Voicebot")]
    CsVoicebot,
    #[serde(rename = "AI-enabled Email")]
    AiEnabledEmail,
    #[serde(rename = "Legacy Chatbot")]
    LegacyChatbot,
    #[serde(rename = "Legacy Voicebot")]
    LegacyVoicebot,
    #[serde(rename = "CSA Chat")]
    CsaChat,
    #[serde(rename = "CSA Voice")]
    CsaVoice,
    #[serde(rename = "CSA Email")]
    CsaEmail,
}

impl Channel {
    /// Every channel in display order.
    pub const ALL: [Channel; 11] = [
        Self::CsLandingPage,
        Self::CsHomepage,
        Self::HelpPages,
        Self::CsChatbot,
        Self::CsVoicebot,
        Self::AiEnabledEmail,
        Self::LegacyChatbot,
        Self::LegacyVoicebot,
        Self::CsaChat,
        Self::CsaVoice,
        Self::CsaEmail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CsLandingPage => "CS Landing Page",
            Self::CsHomepage => "CS Homepage",
            Self::HelpPages => "Help Pages",
            Self::CsChatbot => "CS Chatbot",
            Self::CsVoicebot => "CS Voicebot",
            Self::AiEnabledEmail => "AI-enabled Email",
            Self::LegacyChatbot => "Legacy Chatbot",
            Self::LegacyVoicebot => "Legacy Voicebot",
            Self::CsaChat => "CSA Chat",
            Self::CsaVoice => "CSA Voice",
            Self::CsaEmail => "CSA Email",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL.into_iter().find(|channel| channel.label() == trimmed)
    }

    pub fn category(self) -> ChannelCategory {
        match self {
            Self::CsLandingPage | Self::CsHomepage | Self::HelpPages => ChannelCategory::Visit,
            Self::CsChatbot
            | Self::CsVoicebot
            | Self::AiEnabledEmail
            | Self::LegacyChatbot
            | Self::LegacyVoicebot => ChannelCategory::Bot,
            Self::CsaChat | Self::CsaVoice | Self::CsaEmail => ChannelCategory::Csa,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelCategory {
    Visit,
    Bot,
    Csa,
}

impl ChannelCategory {
    /// Order in which the category groups follow the total group.
    pub const GROUP_ORDER: [ChannelCategory; 3] = [Self::Bot, Self::Csa, Self::Visit];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visit => "visit",
            Self::Bot => "bot",
            Self::Csa => "csa",
        }
    }

    pub fn group_name(self) -> &'static str {
        match self {
            Self::Bot => "Bot-Led: Bot Channels",
            Self::Csa => "Human-Led: CSA Channels",
            Self::Visit => "Self-Service: Visit Channels",
        }
    }
}

/// A channel reference as it arrives from a filter control: the wildcard,
/// a known channel, or a label the matrix does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelSelector {
    #[default]
    All,
    Channel(Channel),
    Unknown(String),
}

impl ChannelSelector {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(WILDCARD) {
            return Self::All;
        }
        match Channel::from_label(trimmed) {
            Some(channel) => Self::Channel(channel),
            None => Self::Unknown(trimmed.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::Channel(channel) => Some(*channel),
            _ => None,
        }
    }

    /// True when the selector admits `channel`. Unknown labels admit nothing.
    pub fn matches(&self, channel: Channel) -> bool {
        match self {
            Self::All => true,
            Self::Channel(selected) => *selected == channel,
            Self::Unknown(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => WILDCARD,
            Self::Channel(channel) => channel.label(),
            Self::Unknown(label) => label,
        }
    }
}

impl From<Channel> for ChannelSelector {
    fn from(value: Channel) -> Self {
        Self::Channel(value)
    }
}

impl From<&str> for ChannelSelector {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for ChannelSelector {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ChannelSelector> for String {
    fn from(value: ChannelSelector) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTransition {
    pub start: Channel,
    pub end: Channel,
}

impl ChannelTransition {
    pub const fn new(start: Channel, end: Channel) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for ChannelTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

// ─── Metrics ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatType {
    Repeat,
    NoRepeat,
}

impl RepeatType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Repeat => "repeat",
            Self::NoRepeat => "no-repeat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    RepeatCount,
    NoRepeatCount,
    ShareOfRepeat,
    ShareOfNoRepeat,
    ShareOfTotal,
}

impl MetricKind {
    /// Per-transition generation order.
    pub const ALL: [MetricKind; 5] = [
        Self::RepeatCount,
        Self::NoRepeatCount,
        Self::ShareOfRepeat,
        Self::ShareOfNoRepeat,
        Self::ShareOfTotal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::RepeatCount => "Repeat Interactions",
            Self::NoRepeatCount => "No Repeat Interactions",
            Self::ShareOfRepeat => "Share of Repeat",
            Self::ShareOfNoRepeat => "Share of No Repeat",
            Self::ShareOfTotal => "Share of Total",
        }
    }

    /// `None` for metrics that span both populations.
    pub fn repeat_type(self) -> Option<RepeatType> {
        match self {
            Self::RepeatCount | Self::ShareOfRepeat => Some(RepeatType::Repeat),
            Self::NoRepeatCount | Self::ShareOfNoRepeat => Some(RepeatType::NoRepeat),
            Self::ShareOfTotal => None,
        }
    }

    pub fn is_share(self) -> bool {
        matches!(self, Self::ShareOfRepeat | Self::ShareOfNoRepeat | Self::ShareOfTotal)
    }

    pub fn metric_name(self, transition: ChannelTransition) -> String {
        format!("{}: {}", self.label(), transition)
    }

    pub fn question(self, transition: ChannelTransition) -> String {
        let ChannelTransition { start, end } = transition;
        match self {
            Self::RepeatCount => format!(
                "How many repeat interactions started in {} and ended in {}?",
                start, end
            ),
            Self::NoRepeatCount => format!(
                "How many no-repeat interactions started in {} and ended in {}?",
                start, end
            ),
            Self::ShareOfRepeat => format!(
                "What share of all repeat interactions moved from {} to {}?",
                start, end
            ),
            Self::ShareOfNoRepeat => format!(
                "What share of all no-repeat interactions moved from {} to {}?",
                start, end
            ),
            Self::ShareOfTotal => format!(
                "What share of total interactions moved from {} to {}?",
                start, end
            ),
        }
    }

    pub fn definition(self, transition: ChannelTransition) -> String {
        let ChannelTransition { start, end } = transition;
        match self {
            Self::RepeatCount => format!(
                "Authenticated customers who contacted or visited two or more times within a trailing 7-day window, starting in {} and ending in {}.",
                start, end
            ),
            Self::NoRepeatCount => format!(
                "Authenticated customers with exactly one contact or visit within a trailing 7-day window, starting in {} and ending in {}.",
                start, end
            ),
            Self::ShareOfRepeat => format!(
                "Repeat interactions from {} to {} as a percentage of all repeat interactions.",
                start, end
            ),
            Self::ShareOfNoRepeat => format!(
                "No-repeat interactions from {} to {} as a percentage of all no-repeat interactions.",
                start, end
            ),
            Self::ShareOfTotal => format!(
                "Interactions from {} to {} as a percentage of all interactions.",
                start, end
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    #[default]
    Weekly,
    Monthly,
}

impl Granularity {
    pub fn points(self) -> usize {
        match self {
            Self::Weekly => 52,
            Self::Monthly => 12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    pub metric_name: String,
    pub question: String,
    pub definition: String,
    pub data2025: Vec<u64>,
    pub data2024: Vec<u64>,
    pub kind: MetricKind,
    pub transition: ChannelTransition,
    pub granularity: Granularity,
}

impl MetricRecord {
    pub fn repeat_type(&self) -> Option<RepeatType> {
        self.kind.repeat_type()
    }

    pub fn end_category(&self) -> ChannelCategory {
        self.transition.end.category()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricGroup {
    pub name: String,
    pub metrics: Vec<MetricRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricFilter {
    pub group: Option<String>,
    pub metric_type: Option<RepeatType>,
    pub start_channel: ChannelSelector,
    pub end_channel: ChannelSelector,
    pub search: Option<String>,
}

// ─── Responses ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub channel: Channel,
    pub label: String,
    pub category: ChannelCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub file_name: String,
    pub content: String,
    pub metric_count: usize,
    pub exported_at: chrono::DateTime<chrono::Utc>,
}
