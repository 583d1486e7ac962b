// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Active tab index into router::PAGES
    pub current_page_index: usize,

    /// Links file path as typed in the side panel
    pub links_text: String,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 1100,
            window_h: 700,
            current_page_index: 0,
            links_text: s!("links.txt"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
