/// A selectable language model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_MODEL_ID: &str = "gpt-4o-mini";

/// Known models, offered for listing. Any model id is accepted for generation.
pub const MODEL_CATALOG: &[ModelDescriptor] = &[
    ModelDescriptor {
        id: "gpt-4o-mini",
        display_name: "GPT-4o mini",
        description: "Fast and inexpensive, good for drafts",
    },
    ModelDescriptor {
        id: "gpt-4o",
        display_name: "GPT-4o",
        description: "Balanced quality for long-form writing",
    },
    ModelDescriptor {
        id: "gpt-4.1-mini",
        display_name: "GPT-4.1 mini",
        description: "Long context, low latency",
    },
    ModelDescriptor {
        id: "gpt-4.1",
        display_name: "GPT-4.1",
        description: "Highest quality prose, slower",
    },
];

pub fn find_model(id: &str) -> Option<&'static ModelDescriptor> {
    let id = id.trim();
    MODEL_CATALOG.iter().find(|model| model.id.eq_ignore_ascii_case(id))
}
