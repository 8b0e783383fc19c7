use serde::{Deserialize, Serialize};

fn default_list_limit() -> usize {
    50
}

fn default_show_examples() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Max library rows rendered per frame
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    #[serde(default = "default_show_examples")]
    pub show_examples: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            show_examples: default_show_examples(),
        }
    }
}
