//! Change event decoding for the device table stream.
//!
//! Only `INSERT` and `MODIFY` records carry a new image worth processing;
//! `REMOVE` and anything unrecognised are skipped.

use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use tracing::debug;

use crate::attribute::{from_item, Attributes};

/// Kind of change a stream record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Modify,
    Remove,
    Other,
}

impl ChangeKind {
    pub fn of(record: &EventRecord) -> Self {
        match record.event_name.as_str() {
            "INSERT" => ChangeKind::Insert,
            "MODIFY" => ChangeKind::Modify,
            "REMOVE" => ChangeKind::Remove,
            _ => ChangeKind::Other,
        }
    }

    /// Whether records of this kind carry a new image to process.
    pub fn is_qualifying(self) -> bool {
        matches!(self, ChangeKind::Insert | ChangeKind::Modify)
    }
}

/// Decode the new image of every qualifying record, in stream order.
pub fn qualifying_images(event: &Event) -> Vec<Attributes> {
    event
        .records
        .iter()
        .filter(|record| ChangeKind::of(record).is_qualifying())
        .map(|record| from_item(&record.change.new_image))
        .collect()
}

/// Decode the latest reading carried by a notification.
///
/// The last qualifying record wins. A notification without any qualifying
/// record decodes to an empty attribute set.
pub fn decode(event: &Event) -> Attributes {
    let reading = qualifying_images(event).pop().unwrap_or_default();
    debug!(reading = ?reading, "decoded device reading");
    reading
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::event::dynamodb::StreamRecord;
    use serde_dynamo::{AttributeValue, Item};
    use std::collections::HashMap;

    fn record(event_name: &str, device: &str) -> EventRecord {
        let mut image = HashMap::new();
        image.insert(
            "device_mac_address".to_string(),
            AttributeValue::S(device.to_string()),
        );
        EventRecord {
            event_name: event_name.to_string(),
            change: StreamRecord {
                new_image: Item::from(image),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn event(records: Vec<EventRecord>) -> Event {
        Event { records }
    }

    fn device_of(attrs: &Attributes) -> Option<&str> {
        attrs.get("device_mac_address").and_then(|a| a.as_str())
    }

    #[test]
    fn classifies_event_names() {
        assert_eq!(ChangeKind::of(&record("INSERT", "a")), ChangeKind::Insert);
        assert_eq!(ChangeKind::of(&record("MODIFY", "a")), ChangeKind::Modify);
        assert_eq!(ChangeKind::of(&record("REMOVE", "a")), ChangeKind::Remove);
        assert_eq!(ChangeKind::of(&record("insert", "a")), ChangeKind::Other);
        assert!(!ChangeKind::Remove.is_qualifying());
    }

    #[test]
    fn last_qualifying_record_wins() {
        let ev = event(vec![record("INSERT", "image-a"), record("MODIFY", "image-b")]);
        assert_eq!(device_of(&decode(&ev)), Some("image-b"));
    }

    #[test]
    fn remove_records_are_ignored() {
        let ev = event(vec![record("MODIFY", "image-b"), record("REMOVE", "image-c")]);
        assert_eq!(device_of(&decode(&ev)), Some("image-b"));
    }

    #[test]
    fn empty_notification_decodes_to_empty_reading() {
        assert!(decode(&event(vec![])).is_empty());
        assert!(decode(&event(vec![record("REMOVE", "gone")])).is_empty());
    }

    #[test]
    fn qualifying_images_preserve_order() {
        let ev = event(vec![
            record("INSERT", "first"),
            record("REMOVE", "skipped"),
            record("MODIFY", "second"),
        ]);
        let images = qualifying_images(&ev);
        let devices: Vec<_> = images.iter().filter_map(device_of).collect();
        assert_eq!(devices, vec!["first", "second"]);
    }
}
