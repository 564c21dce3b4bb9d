//! Day-grouped timeline rendering

use crate::format::{format_time, pluralize};
use crate::models::{Activity, DayKey};
use crate::view::{Block, EntryBlock, PageView, Slot};
use tracing::debug;

/// Activities of one day, in document order
#[derive(Debug, Clone)]
pub struct DayGroup<'a> {
    pub day: DayKey,
    pub activities: Vec<&'a Activity>,
}

impl DayGroup<'_> {
    /// `"1 activity"`, `"3 activities"`
    #[must_use]
    pub fn summary(&self) -> String {
        pluralize(self.activities.len(), "activity", "activities")
    }
}

/// Partition activities by day, days in ascending numeric order.
///
/// Entries within a day keep their original relative order.
#[must_use]
pub fn group_by_day(activities: &[Activity]) -> Vec<DayGroup<'_>> {
    let mut keyed: Vec<(DayKey, &Activity)> = activities.iter().map(|a| (a.day(), a)).collect();
    // stable sort keeps document order inside a day
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut groups: Vec<DayGroup<'_>> = Vec::new();
    for (day, activity) in keyed {
        match groups.last_mut() {
            Some(group) if group.day == day => group.activities.push(activity),
            _ => groups.push(DayGroup {
                day,
                activities: vec![activity],
            }),
        }
    }
    groups
}

/// Display block for one activity
#[must_use]
pub fn entry_block(activity: &Activity) -> EntryBlock {
    EntryBlock {
        time: format_time(&activity.time),
        title: activity.title.clone(),
        description: activity.description.clone(),
        address: activity.address.clone(),
    }
}

/// Replace the timeline slot with a header and entries per day
pub fn render_timeline<V: PageView>(view: &mut V, groups: &[DayGroup<'_>]) {
    view.clear(Slot::Timeline);

    for group in groups {
        debug!("Rendering day {} with {}", group.day, group.summary());
        view.append(
            Slot::Timeline,
            Block::DayHeader {
                day: group.day.to_string(),
                summary: group.summary(),
            },
        );
        for activity in &group.activities {
            view.append(Slot::Timeline, Block::Entry(entry_block(activity)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::PageModel;

    fn activity(day: Option<&str>, title: &str) -> Activity {
        Activity {
            time: "09:00".into(),
            title: title.into(),
            description: String::new(),
            address: String::new(),
            day: day.map(DayKey::new),
            coordinate: None,
        }
    }

    #[test]
    fn test_grouping_sorts_days_and_keeps_order_within_day() {
        let activities = vec![
            activity(Some("2"), "a"),
            activity(Some("1"), "b"),
            activity(Some("1"), "c"),
        ];
        let groups = group_by_day(&activities);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].day.label(), "1");
        let titles: Vec<_> = groups[0].activities.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
        assert_eq!(groups[1].day.label(), "2");
        assert_eq!(groups[1].activities.len(), 1);
    }

    #[test]
    fn test_grouping_is_numeric_not_lexical() {
        let activities = vec![activity(Some("10"), "late"), activity(Some("9"), "early")];
        let groups = group_by_day(&activities);
        assert_eq!(groups[0].day.label(), "9");
        assert_eq!(groups[1].day.label(), "10");
    }

    #[test]
    fn test_missing_day_joins_day_one() {
        let activities = vec![activity(None, "implicit"), activity(Some("1"), "explicit")];
        let groups = group_by_day(&activities);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].summary(), "2 activities");
    }

    #[test]
    fn test_padded_and_blank_days_merge_with_day_one() {
        let activities = vec![
            activity(Some("01"), "padded"),
            activity(Some(""), "blank"),
            activity(Some("1"), "plain"),
        ];
        let groups = group_by_day(&activities);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].day.label(), "1");
        assert_eq!(groups[0].summary(), "3 activities");
    }

    #[test]
    fn test_render_timeline_blocks() {
        let activities = vec![activity(Some("2"), "a"), activity(Some("1"), "b")];
        let groups = group_by_day(&activities);
        let mut page = PageModel::default();
        page.append(
            Slot::Timeline,
            Block::DayHeader {
                day: "stale".into(),
                summary: String::new(),
            },
        );

        render_timeline(&mut page, &groups);

        let blocks = page.blocks(Slot::Timeline);
        assert_eq!(blocks.len(), 4);
        assert_eq!(
            blocks[0],
            Block::DayHeader {
                day: "1".into(),
                summary: "1 activity".into()
            }
        );
        match &blocks[1] {
            Block::Entry(entry) => {
                assert_eq!(entry.title, "b");
                assert_eq!(entry.time, "9:00 AM");
            }
            other => panic!("expected entry, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_timeline() {
        let groups = group_by_day(&[]);
        assert!(groups.is_empty());
        let mut page = PageModel::default();
        render_timeline(&mut page, &groups);
        assert!(page.blocks(Slot::Timeline).is_empty());
    }
}
