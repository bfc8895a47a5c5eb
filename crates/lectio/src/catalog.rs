//! Built-in reading plan catalog.
//!
//! Plans are static, read-only definitions; users start a mutable copy
//! through the tracker. Day references use canonical collection names.

use lectio_core::models::{Plan, PlanCategory, PlanColor, PlanDay};
use lectio_core::reference::Reference;

fn reference(collection: &str, sequence: u32, start: u32, end: u32) -> Reference {
    Reference {
        collection_name: collection.to_string(),
        sequence_index: sequence,
        start_unit: start,
        end_unit: end,
    }
}

fn day(plan_id: &str, day_number: u32, title: &str, references: Vec<Reference>) -> PlanDay {
    PlanDay {
        id: format!("{plan_id}-day-{day_number}"),
        day_number,
        title: title.to_string(),
        references,
        completed: false,
        completed_at: None,
    }
}

/// The full catalog, in display order.
pub fn builtin_plans() -> Vec<Plan> {
    vec![beginnings(), light_of_the_world(), psalms_of_comfort(), wisdom_for_work()]
}

fn beginnings() -> Plan {
    let id = "beginnings";
    Plan {
        id: id.to_string(),
        title: "Beginnings".to_string(),
        description: "Seven days through the creation account.".to_string(),
        duration_days: 7,
        category: PlanCategory::Foundations,
        color: PlanColor::Amber,
        days: vec![
            day(id, 1, "Light out of darkness", vec![reference("Genesis", 1, 1, 5)]),
            day(id, 2, "Waters above and below", vec![reference("Genesis", 1, 6, 13)]),
            day(id, 3, "Lights to mark the seasons", vec![reference("Genesis", 1, 14, 19)]),
            day(id, 4, "Every living creature", vec![reference("Genesis", 1, 20, 25)]),
            day(id, 5, "In his image", vec![reference("Genesis", 1, 26, 31)]),
            day(id, 6, "Rest", vec![reference("Genesis", 2, 1, 3)]),
            day(id, 7, "A garden in the east", vec![reference("Genesis", 2, 4, 9)]),
        ],
    }
}

fn light_of_the_world() -> Plan {
    let id = "light-of-the-world";
    Plan {
        id: id.to_string(),
        title: "Light of the World".to_string(),
        description: "A week in the Gospel of John.".to_string(),
        duration_days: 7,
        category: PlanCategory::Gospels,
        color: PlanColor::Violet,
        days: vec![
            day(id, 1, "The Word made flesh", vec![reference("John", 1, 1, 14)]),
            day(id, 2, "Born again", vec![reference("John", 3, 1, 8)]),
            day(id, 3, "God so loved", vec![reference("John", 3, 16, 21)]),
            day(id, 4, "Living water", vec![reference("John", 4, 7, 14)]),
            day(id, 5, "Bread of life", vec![reference("John", 6, 35, 40)]),
            day(id, 6, "The good shepherd", vec![reference("John", 10, 11, 18)]),
            day(id, 7, "Peace I leave with you", vec![reference("John", 14, 25, 31)]),
        ],
    }
}

fn psalms_of_comfort() -> Plan {
    let id = "psalms-of-comfort";
    Plan {
        id: id.to_string(),
        title: "Psalms of Comfort".to_string(),
        description: "Five psalms for anxious seasons.".to_string(),
        duration_days: 5,
        category: PlanCategory::Comfort,
        color: PlanColor::Blue,
        days: vec![
            day(id, 1, "My shepherd", vec![reference("Psalms", 23, 1, 6)]),
            day(id, 2, "A very present help", vec![reference("Psalms", 46, 1, 7)]),
            day(id, 3, "I lift up my eyes", vec![reference("Psalms", 121, 1, 8)]),
            day(id, 4, "Whom shall I fear", vec![reference("Psalms", 27, 1, 6)]),
            day(id, 5, "Under his wings", vec![reference("Psalms", 91, 1, 8)]),
        ],
    }
}

fn wisdom_for_work() -> Plan {
    let id = "wisdom-for-work";
    Plan {
        id: id.to_string(),
        title: "Wisdom for Work".to_string(),
        description: "Proverbs on diligence, speech, and planning.".to_string(),
        duration_days: 5,
        category: PlanCategory::Wisdom,
        color: PlanColor::Green,
        days: vec![
            day(id, 1, "Trust and acknowledge", vec![reference("Proverbs", 3, 1, 8)]),
            day(id, 2, "Go to the ant", vec![reference("Proverbs", 6, 6, 11)]),
            day(id, 3, "A gentle answer", vec![reference("Proverbs", 15, 1, 4)]),
            day(id, 4, "Commit your plans", vec![reference("Proverbs", 16, 1, 9)]),
            day(id, 5, "A good name", vec![reference("Proverbs", 22, 1, 6)]),
        ],
    }
}
