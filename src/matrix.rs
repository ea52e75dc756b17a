use crate::models::Channel::{self, *};
use crate::models::{ChannelSelector, ChannelTransition};
use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const TRANSITION_COUNT: usize = 80;

const fn t(start: Channel, end: Channel) -> ChannelTransition {
    ChannelTransition::new(start, end)
}

/// Permitted start → end transitions, in display order.
///
/// Visit channels reach every bot and agent channel; among themselves only
/// through Help Pages. Bot channels never fall back to a visit. Agent (CSA)
/// channels only hand off to other agent channels.
pub static TRANSITIONS: [ChannelTransition; TRANSITION_COUNT] = [
    t(CsLandingPage, CsLandingPage),
    t(CsLandingPage, HelpPages),
    t(CsLandingPage, CsChatbot),
    t(CsLandingPage, CsVoicebot),
    t(CsLandingPage, AiEnabledEmail),
    t(CsLandingPage, LegacyChatbot),
    t(CsLandingPage, LegacyVoicebot),
    t(CsLandingPage, CsaChat),
    t(CsLandingPage, CsaVoice),
    t(CsLandingPage, CsaEmail),
    t(CsHomepage, CsHomepage),
    t(CsHomepage, HelpPages),
    t(CsHomepage, CsChatbot),
    t(CsHomepage, CsVoicebot),
    t(CsHomepage, AiEnabledEmail),
    t(CsHomepage, LegacyChatbot),
    t(CsHomepage, LegacyVoicebot),
    t(CsHomepage, CsaChat),
    t(CsHomepage, CsaVoice),
    t(CsHomepage, CsaEmail),
    t(HelpPages, CsLandingPage),
    t(HelpPages, CsHomepage),
    t(HelpPages, HelpPages),
    t(HelpPages, CsChatbot),
    t(HelpPages, CsVoicebot),
    t(HelpPages, AiEnabledEmail),
    t(HelpPages, LegacyChatbot),
    t(HelpPages, LegacyVoicebot),
    t(HelpPages, CsaChat),
    t(HelpPages, CsaVoice),
    t(HelpPages, CsaEmail),
    t(CsChatbot, CsChatbot),
    t(CsChatbot, CsVoicebot),
    t(CsChatbot, AiEnabledEmail),
    t(CsChatbot, LegacyChatbot),
    t(CsChatbot, LegacyVoicebot),
    t(CsChatbot, CsaChat),
    t(CsChatbot, CsaVoice),
    t(CsChatbot, CsaEmail),
    t(CsVoicebot, CsChatbot),
    t(CsVoicebot, CsVoicebot),
    t(CsVoicebot, AiEnabledEmail),
    t(CsVoicebot, LegacyChatbot),
    t(CsVoicebot, LegacyVoicebot),
    t(CsVoicebot, CsaChat),
    t(CsVoicebot, CsaVoice),
    t(CsVoicebot, CsaEmail),
    t(AiEnabledEmail, CsChatbot),
    t(AiEnabledEmail, CsVoicebot),
    t(AiEnabledEmail, AiEnabledEmail),
    t(AiEnabledEmail, LegacyChatbot),
    t(AiEnabledEmail, LegacyVoicebot),
    t(AiEnabledEmail, CsaChat),
    t(AiEnabledEmail, CsaVoice),
    t(AiEnabledEmail, CsaEmail),
    t(LegacyChatbot, CsChatbot),
    t(LegacyChatbot, CsVoicebot),
    t(LegacyChatbot, AiEnabledEmail),
    t(LegacyChatbot, LegacyChatbot),
    t(LegacyChatbot, LegacyVoicebot),
    t(LegacyChatbot, CsaChat),
    t(LegacyChatbot, CsaVoice),
    t(LegacyChatbot, CsaEmail),
    t(LegacyVoicebot, CsChatbot),
    t(LegacyVoicebot, CsVoicebot),
    t(LegacyVoicebot, AiEnabledEmail),
    t(LegacyVoicebot, LegacyChatbot),
    t(LegacyVoicebot, LegacyVoicebot),
    t(LegacyVoicebot, CsaChat),
    t(LegacyVoicebot, CsaVoice),
    t(LegacyVoicebot, CsaEmail),
    t(CsaChat, CsaChat),
    t(CsaChat, CsaVoice),
    t(CsaChat, CsaEmail),
    t(CsaVoice, CsaChat),
    t(CsaVoice, CsaVoice),
    t(CsaVoice, CsaEmail),
    t(CsaEmail, CsaChat),
    t(CsaEmail, CsaVoice),
    t(CsaEmail, CsaEmail),
];

static TRANSITION_SET: Lazy<HashSet<(Channel, Channel)>> = Lazy::new(|| {
    TRANSITIONS
        .iter()
        .map(|transition| (transition.start, transition.end))
        .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelMatrix;

impl ChannelMatrix {
    pub fn new() -> Self {
        Self
    }

    pub fn transitions(&self) -> &'static [ChannelTransition] {
        &TRANSITIONS
    }

    pub fn contains(&self, start: Channel, end: Channel) -> bool {
        TRANSITION_SET.contains(&(start, end))
    }

    /// The wildcard on either side always validates, even against a label
    /// the matrix does not know. Unknown labels otherwise never validate.
    pub fn is_valid_combination(&self, start: &ChannelSelector, end: &ChannelSelector) -> bool {
        if start.is_all() || end.is_all() {
            return true;
        }
        match (start.channel(), end.channel()) {
            (Some(start), Some(end)) => self.contains(start, end),
            _ => false,
        }
    }

    pub fn valid_end_channels(&self, start: &ChannelSelector) -> Vec<Channel> {
        match start {
            ChannelSelector::All => Channel::ALL.to_vec(),
            ChannelSelector::Channel(start) => TRANSITIONS
                .iter()
                .filter(|transition| transition.start == *start)
                .map(|transition| transition.end)
                .collect(),
            ChannelSelector::Unknown(_) => Vec::new(),
        }
    }

    pub fn valid_start_channels(&self, end: &ChannelSelector) -> Vec<Channel> {
        match end {
            ChannelSelector::All => Channel::ALL.to_vec(),
            ChannelSelector::Channel(end) => TRANSITIONS
                .iter()
                .filter(|transition| transition.end == *end)
                .map(|transition| transition.start)
                .collect(),
            ChannelSelector::Unknown(_) => Vec::new(),
        }
    }

    pub fn is_valid_label_combination(&self, start: &str, end: &str) -> bool {
        self.is_valid_combination(&ChannelSelector::parse(start), &ChannelSelector::parse(end))
    }

    pub fn valid_end_labels(&self, start: &str) -> Vec<&'static str> {
        self.valid_end_channels(&ChannelSelector::parse(start))
            .into_iter()
            .map(Channel::label)
            .collect()
    }

    pub fn valid_start_labels(&self, end: &str) -> Vec<&'static str> {
        self.valid_start_channels(&ChannelSelector::parse(end))
            .into_iter()
            .map(Channel::label)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelMatrix, TRANSITIONS, TRANSITION_COUNT};
    use crate::models::{Channel, ChannelCategory, ChannelSelector};
    use std::collections::HashSet;

    fn expected_by_rule(start: Channel, end: Channel) -> bool {
        if start == end {
            return true;
        }
        match (start.category(), end.category()) {
            (ChannelCategory::Visit, ChannelCategory::Visit) => {
                start == Channel::HelpPages || end == Channel::HelpPages
            }
            (ChannelCategory::Visit, _) => true,
            (ChannelCategory::Bot, ChannelCategory::Visit) => false,
            (ChannelCategory::Bot, _) => true,
            (ChannelCategory::Csa, ChannelCategory::Csa) => true,
            (ChannelCategory::Csa, _) => false,
        }
    }

    #[test]
    fn table_has_no_duplicates() {
        let unique: HashSet<_> = TRANSITIONS.iter().collect();
        assert_eq!(unique.len(), TRANSITION_COUNT);
    }

    #[test]
    fn table_matches_category_rules() {
        let matrix = ChannelMatrix::new();
        for start in Channel::ALL {
            for end in Channel::ALL {
                assert_eq!(
                    matrix.contains(start, end),
                    expected_by_rule(start, end),
                    "{} -> {}",
                    start,
                    end
                );
            }
        }
    }

    #[test]
    fn wildcard_validates_anything() {
        let matrix = ChannelMatrix::new();
        assert!(matrix.is_valid_label_combination("all", "CS Chatbot"));
        assert!(matrix.is_valid_label_combination("CSA Email", "all"));
        assert!(matrix.is_valid_label_combination("Nowhere", "all"));
    }

    #[test]
    fn unknown_labels_yield_nothing() {
        let matrix = ChannelMatrix::new();
        assert!(!matrix.is_valid_label_combination("Nowhere", "CSA Chat"));
        assert!(matrix.valid_end_labels("Nowhere").is_empty());
        assert!(matrix.valid_start_labels("Nowhere").is_empty());
    }

    #[test]
    fn visit_pages_only_link_through_help() {
        let matrix = ChannelMatrix::new();
        assert!(!matrix.is_valid_label_combination("CS Landing Page", "CS Homepage"));
        assert!(!matrix.is_valid_label_combination("CS Homepage", "CS Landing Page"));
        assert!(matrix.is_valid_label_combination("Help Pages", "CS Landing Page"));
    }

    #[test]
    fn csa_never_hands_back_to_bots() {
        let matrix = ChannelMatrix::new();
        assert!(!matrix.is_valid_label_combination("CSA Chat", "CS Chatbot"));
        assert!(matrix.is_valid_label_combination("CSA Voice", "CSA Email"));
        assert_eq!(
            matrix.valid_end_labels("CSA Chat"),
            vec!["CSA Chat", "CSA Voice", "CSA Email"]
        );
    }

    #[test]
    fn chatbot_reaches_bots_and_agents() {
        let matrix = ChannelMatrix::new();
        assert_eq!(
            matrix.valid_end_labels("CS Chatbot"),
            vec![
                "CS Chatbot",
                "CS Voicebot",
                "AI-enabled Email",
                "Legacy Chatbot",
                "Legacy Voicebot",
                "CSA Chat",
                "CSA Voice",
                "CSA Email",
            ]
        );
    }

    #[test]
    fn start_and_end_lookups_are_inverse() {
        let matrix = ChannelMatrix::new();
        for start in Channel::ALL {
            let ends = matrix.valid_end_channels(&ChannelSelector::Channel(start));
            for end in Channel::ALL {
                let starts = matrix.valid_start_channels(&ChannelSelector::Channel(end));
                assert_eq!(ends.contains(&end), starts.contains(&start));
                assert_eq!(ends.contains(&end), matrix.contains(start, end));
            }
        }
    }

    #[test]
    fn wildcard_expands_to_every_channel() {
        let matrix = ChannelMatrix::new();
        assert_eq!(matrix.valid_end_channels(&ChannelSelector::All), Channel::ALL.to_vec());
        assert_eq!(matrix.valid_start_channels(&ChannelSelector::All).len(), 11);
    }
}
