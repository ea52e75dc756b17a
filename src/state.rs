use crate::matrix::ChannelMatrix;
use crate::models::{ChannelSelector, Granularity, MetricFilter, RepeatType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardView {
    #[default]
    Table,
    Cards,
    Charts,
}

/// View state owned by the root view. Updates return a new value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub view: DashboardView,
    pub filter: MetricFilter,
    pub expanded_groups: BTreeSet<String>,
    pub granularity: Granularity,
}

impl DashboardState {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            ..Self::default()
        }
    }

    pub fn set_view(&self, view: DashboardView) -> Self {
        Self {
            view,
            ..self.clone()
        }
    }

    pub fn set_granularity(&self, granularity: Granularity) -> Self {
        Self {
            granularity,
            ..self.clone()
        }
    }

    pub fn toggle_group(&self, group: &str) -> Self {
        let mut expanded_groups = self.expanded_groups.clone();
        if !expanded_groups.remove(group) {
            expanded_groups.insert(group.to_string());
        }
        Self {
            expanded_groups,
            ..self.clone()
        }
    }

    pub fn set_group(&self, group: Option<String>) -> Self {
        self.with_filter(MetricFilter {
            group,
            ..self.filter.clone()
        })
    }

    pub fn set_metric_type(&self, metric_type: Option<RepeatType>) -> Self {
        self.with_filter(MetricFilter {
            metric_type,
            ..self.filter.clone()
        })
    }

    pub fn set_search(&self, search: Option<String>) -> Self {
        self.with_filter(MetricFilter {
            search,
            ..self.filter.clone()
        })
    }

    /// Changing the start drops an end channel it can no longer reach.
    pub fn select_start_channel(&self, matrix: &ChannelMatrix, start: ChannelSelector) -> Self {
        let end_channel = if matrix.is_valid_combination(&start, &self.filter.end_channel) {
            self.filter.end_channel.clone()
        } else {
            ChannelSelector::All
        };
        self.with_filter(MetricFilter {
            start_channel: start,
            end_channel,
            ..self.filter.clone()
        })
    }

    pub fn select_end_channel(&self, matrix: &ChannelMatrix, end: ChannelSelector) -> Self {
        let start_channel = if matrix.is_valid_combination(&self.filter.start_channel, &end) {
            self.filter.start_channel.clone()
        } else {
            ChannelSelector::All
        };
        self.with_filter(MetricFilter {
            start_channel,
            end_channel: end,
            ..self.filter.clone()
        })
    }

    pub fn reset_filters(&self) -> Self {
        self.with_filter(MetricFilter::default())
    }

    fn with_filter(&self, filter: MetricFilter) -> Self {
        Self {
            filter,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardState, DashboardView};
    use crate::matrix::ChannelMatrix;
    use crate::models::{Channel, ChannelSelector, Granularity, RepeatType};

    #[test]
    fn updates_leave_previous_state_untouched() {
        let initial = DashboardState::new(Granularity::Weekly);
        let next = initial.set_view(DashboardView::Charts).toggle_group("Total Interactions");

        assert_eq!(initial.view, DashboardView::Table);
        assert!(initial.expanded_groups.is_empty());
        assert_eq!(next.view, DashboardView::Charts);
        assert!(next.expanded_groups.contains("Total Interactions"));
        assert!(next.toggle_group("Total Interactions").expanded_groups.is_empty());
    }

    #[test]
    fn start_change_clears_unreachable_end() {
        let matrix = ChannelMatrix::new();
        let state = DashboardState::default()
            .select_end_channel(&matrix, ChannelSelector::Channel(Channel::CsChatbot))
            .select_start_channel(&matrix, ChannelSelector::Channel(Channel::CsaChat));

        assert_eq!(state.filter.start_channel, ChannelSelector::Channel(Channel::CsaChat));
        assert_eq!(state.filter.end_channel, ChannelSelector::All);
    }

    #[test]
    fn end_change_keeps_reachable_start() {
        let matrix = ChannelMatrix::new();
        let state = DashboardState::default()
            .select_start_channel(&matrix, ChannelSelector::Channel(Channel::HelpPages))
            .select_end_channel(&matrix, ChannelSelector::Channel(Channel::CsLandingPage));

        assert_eq!(state.filter.start_channel, ChannelSelector::Channel(Channel::HelpPages));
        assert_eq!(state.filter.end_channel, ChannelSelector::Channel(Channel::CsLandingPage));
    }

    #[test]
    fn reset_clears_filter_but_keeps_view() {
        let state = DashboardState::default()
            .set_view(DashboardView::Cards)
            .set_metric_type(Some(RepeatType::NoRepeat))
            .set_search(Some("email".to_string()))
            .reset_filters();

        assert_eq!(state.view, DashboardView::Cards);
        assert_eq!(state.filter.metric_type, None);
        assert_eq!(state.filter.search, None);
    }
}
