use crate::catalog::MetricCatalog;
use crate::matrix::ChannelMatrix;
use crate::models::{MetricFilter, MetricGroup, MetricRecord, SHOW_ALL_GROUPS};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricFilterEngine {
    matrix: ChannelMatrix,
}

impl MetricFilterEngine {
    pub fn new(matrix: ChannelMatrix) -> Self {
        Self { matrix }
    }

    pub fn apply(&self, catalog: &MetricCatalog, filter: &MetricFilter) -> Vec<MetricGroup> {
        if !self
            .matrix
            .is_valid_combination(&filter.start_channel, &filter.end_channel)
        {
            tracing::debug!(
                start = filter.start_channel.as_str(),
                end = filter.end_channel.as_str(),
                "rejected filter with invalid channel combination"
            );
            return Vec::new();
        }

        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);

        let groups = catalog
            .groups()
            .into_iter()
            .filter(|group| group_selected(filter.group.as_deref(), &group.name))
            .filter_map(|group| {
                let metrics = group
                    .metrics
                    .into_iter()
                    .filter(|record| self.keep(record, filter, search.as_deref()))
                    .collect::<Vec<_>>();
                (!metrics.is_empty()).then(|| MetricGroup {
                    name: group.name,
                    metrics,
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            group = filter.group.as_deref().unwrap_or(SHOW_ALL_GROUPS),
            metric_type = filter.metric_type.map(|kind| kind.as_str()).unwrap_or("any"),
            start = filter.start_channel.as_str(),
            end = filter.end_channel.as_str(),
            groups = groups.len(),
            "filtered metric catalog"
        );

        groups
    }

    fn keep(&self, record: &MetricRecord, filter: &MetricFilter, search: Option<&str>) -> bool {
        if let Some(metric_type) = filter.metric_type {
            if record.repeat_type() != Some(metric_type) {
                return false;
            }
        }

        if !filter.start_channel.matches(record.transition.start)
            || !filter.end_channel.matches(record.transition.end)
        {
            return false;
        }

        if let Some(needle) = search {
            let in_name = record.metric_name.to_lowercase().contains(needle);
            let in_question = record.question.to_lowercase().contains(needle);
            if !in_name && !in_question {
                return false;
            }
        }

        // Catalog records are generated from the matrix, but a catalog can be
        // deserialized from anywhere.
        self.matrix.contains(record.transition.start, record.transition.end)
    }
}

fn group_selected(requested: Option<&str>, group_name: &str) -> bool {
    match requested.map(str::trim) {
        None => true,
        Some(name) if name.is_empty() || name.eq_ignore_ascii_case(SHOW_ALL_GROUPS) => true,
        Some(name) => name.eq_ignore_ascii_case(group_name),
    }
}

#[cfg(test)]
mod tests {
    use super::MetricFilterEngine;
    use crate::catalog::MetricCatalog;
    use crate::generator::MetricGenerator;
    use crate::matrix::ChannelMatrix;
    use crate::models::{
        Channel, ChannelCategory, ChannelSelector, ChannelTransition, Granularity, MetricFilter, MetricKind,
        MetricRecord, RepeatType,
    };
    use crate::settings::DashboardSettings;

    fn catalog() -> MetricCatalog {
        MetricGenerator::new(DashboardSettings::default(), ChannelMatrix::new()).generate(Granularity::Monthly)
    }

    #[test]
    fn empty_filter_returns_every_group() {
        let groups = MetricFilterEngine::default().apply(&catalog(), &MetricFilter::default());
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn repeat_filter_excludes_no_repeat_and_total_shares() {
        let filter = MetricFilter {
            metric_type: Some(RepeatType::Repeat),
            ..MetricFilter::default()
        };
        let groups = MetricFilterEngine::default().apply(&catalog(), &filter);
        assert!(!groups.is_empty());
        for record in groups.iter().flat_map(|group| &group.metrics) {
            assert!(!record.metric_name.contains("No Repeat"));
            assert_ne!(record.kind, MetricKind::ShareOfTotal);
        }
    }

    #[test]
    fn invalid_pair_returns_nothing() {
        let filter = MetricFilter {
            start_channel: ChannelSelector::Channel(Channel::CsaChat),
            end_channel: ChannelSelector::Channel(Channel::CsChatbot),
            ..MetricFilter::default()
        };
        assert!(MetricFilterEngine::default().apply(&catalog(), &filter).is_empty());
    }

    #[test]
    fn forged_record_with_illegal_transition_is_dropped() {
        let source = catalog();
        let mut records = source.records().to_vec();
        let forged_transition = ChannelTransition::new(Channel::CsaChat, Channel::CsChatbot);
        records.push(MetricRecord {
            metric_name: MetricKind::RepeatCount.metric_name(forged_transition),
            question: String::new(),
            definition: String::new(),
            data2025: vec![1; 12],
            data2024: vec![1; 12],
            kind: MetricKind::RepeatCount,
            transition: forged_transition,
            granularity: Granularity::Monthly,
        });
        let tampered = MetricCatalog::new(source.seed(), Granularity::Monthly, records);

        let filter = MetricFilter {
            start_channel: ChannelSelector::Channel(Channel::CsaChat),
            ..MetricFilter::default()
        };
        let groups = MetricFilterEngine::default().apply(&tampered, &filter);
        assert!(groups
            .iter()
            .flat_map(|group| &group.metrics)
            .all(|record| record.transition.end.category() == ChannelCategory::Csa));
    }

    #[test]
    fn unknown_group_or_channel_matches_nothing() {
        let engine = MetricFilterEngine::default();
        let by_group = MetricFilter {
            group: Some("Mystery Shoppers".to_string()),
            ..MetricFilter::default()
        };
        assert!(engine.apply(&catalog(), &by_group).is_empty());

        let by_channel = MetricFilter {
            start_channel: ChannelSelector::parse("Fax"),
            ..MetricFilter::default()
        };
        assert!(engine.apply(&catalog(), &by_channel).is_empty());
    }

    #[test]
    fn group_name_match_ignores_case() {
        let filter = MetricFilter {
            group: Some("human-led: csa channels".to_string()),
            ..MetricFilter::default()
        };
        let groups = MetricFilterEngine::default().apply(&catalog(), &filter);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, ChannelCategory::Csa.group_name());
    }

    #[test]
    fn search_matches_name_or_question() {
        let filter = MetricFilter {
            search: Some("legacy voicebot".to_string()),
            group: Some("show all".to_string()),
            ..MetricFilter::default()
        };
        let groups = MetricFilterEngine::default().apply(&catalog(), &filter);
        assert!(groups
            .iter()
            .flat_map(|group| &group.metrics)
            .all(|record| record.transition.start == Channel::LegacyVoicebot
                || record.transition.end == Channel::LegacyVoicebot));
    }
}
