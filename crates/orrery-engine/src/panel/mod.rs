//! Explorer state: what is selected, the info panel and its Q&A transcript.
//!
//! The only mutable state in the engine. Geometry never reads it except
//! through the `ViewState` passed into `Scene::frame`.

pub mod prompt;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{CelestialBody, Language};
use crate::core::scene::Scene;
use crate::renderer::svg::render_svg;

/// Selection, hover and language. Read by the renderer every frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selected: Option<String>,
    pub hovered: Option<String>,
    pub language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            is_error: true,
        }
    }
}

/// Why an answer could not be fetched. Never shown verbatim; the panel
/// turns every variant into the same localized fallback.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AskFailure {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// An outstanding question. Hand it back to `Explorer::resolve` with the
/// outcome; it is ignored if the panel moved on in the meantime or the
/// question was already answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskTicket {
    /// Unique per submission within one `Explorer`.
    pub id: u64,
    pub epoch: u64,
    pub body_id: String,
    pub language: Language,
    /// Full prompt to send upstream.
    pub prompt: String,
}

/// Transcript plus the outstanding ticket, if any.
///
/// `epoch` increases on every reset; tickets from an older epoch are stale.
/// At most one ticket is pending and only it may be resolved.
#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
    transcript: Vec<ChatMessage>,
    pending: Option<u64>,
    next_ticket: u64,
    epoch: u64,
}

impl InfoPanel {
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn reset(&mut self) {
        self.transcript.clear();
        self.pending = None;
        self.epoch += 1;
    }
}

/// Localized, display-ready body summary for the panel header and stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoCard {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub detail: String,
    pub facts: Vec<String>,
    pub temperature: String,
    /// e.g. "30s (Scaled)".
    pub orbit: String,
    pub photo: Option<String>,
}

impl InfoCard {
    pub fn new(body: &CelestialBody, lang: Language, photo: Option<String>) -> Self {
        let content = body.content(lang);
        let scaled = match lang {
            Language::En => "Scaled",
            Language::Zh => "模拟",
        };
        Self {
            id: body.id.clone(),
            name: content.name.clone(),
            kind: content.kind.clone(),
            description: content.description.clone(),
            detail: content.detail.clone(),
            facts: content.facts.clone(),
            temperature: body.temperature.clone(),
            orbit: format!("{}s ({scaled})", body.orbit_period),
            photo,
        }
    }
}

/// Top-level view: owns the scene, the view state and the panel.
#[derive(Debug, Clone)]
pub struct Explorer {
    scene: Scene,
    view: ViewState,
    panel: InfoPanel,
}

impl Explorer {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            view: ViewState::default(),
            panel: InfoPanel::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn language(&self) -> Language {
        self.view.language
    }

    pub fn selected_body(&self) -> Option<&CelestialBody> {
        let id = self.view.selected.as_deref()?;
        self.scene.catalog().get(id)
    }

    /// Select a body by id. Switching to a different body resets the
    /// panel; re-selecting the current one keeps it. Unknown ids are
    /// ignored and return false.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.scene.catalog().contains(id) {
            log::warn!("select: unknown body '{id}'");
            return false;
        }
        if self.view.selected.as_deref() != Some(id) {
            self.view.selected = Some(id.to_string());
            self.panel.reset();
        }
        true
    }

    pub fn hover(&mut self, id: Option<&str>) {
        self.view.hovered = id
            .filter(|id| self.scene.catalog().contains(id))
            .map(str::to_string);
    }

    pub fn close_panel(&mut self) {
        self.view.selected = None;
        self.panel.reset();
    }

    pub fn set_language(&mut self, lang: Language) {
        if self.view.language != lang {
            self.view.language = lang;
            self.panel.reset();
        }
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.view.language.toggle());
    }

    /// Click at a scene point. Selects the body under it, if any.
    pub fn click(&mut self, t: f64, point: DVec2) -> Option<String> {
        let id = self.scene.hit_test(t, point)?.id.clone();
        self.select(&id);
        Some(id)
    }

    /// Info card for the selected body in the current language.
    pub fn card(&self) -> Option<InfoCard> {
        let body = self.selected_body()?;
        let photo = self.scene.assets().photo_uri(&body.id);
        Some(InfoCard::new(body, self.view.language, photo))
    }

    /// Submit a question about the selected body.
    ///
    /// Appends the user entry and marks the panel busy. Returns `None`
    /// without touching anything when nothing is selected, the question is
    /// blank, or an answer is still outstanding.
    pub fn submit(&mut self, question: &str) -> Option<AskTicket> {
        let question = question.trim();
        if self.panel.is_loading() || question.is_empty() {
            return None;
        }
        let body = self.selected_body()?;
        let lang = self.view.language;
        let ticket = AskTicket {
            id: self.panel.next_ticket,
            epoch: self.panel.epoch,
            body_id: body.id.clone(),
            language: lang,
            prompt: prompt::build_prompt(body.content(lang), question, lang),
        };
        self.panel.transcript.push(ChatMessage::user(question));
        self.panel.pending = Some(ticket.id);
        self.panel.next_ticket += 1;
        Some(ticket)
    }

    /// Apply the outcome of a ticket. Returns false if the ticket is stale
    /// or already resolved, and the outcome was dropped.
    pub fn resolve(&mut self, ticket: &AskTicket, outcome: Result<String, AskFailure>) -> bool {
        if ticket.epoch != self.panel.epoch || self.panel.pending != Some(ticket.id) {
            log::debug!(
                "dropping stale answer for '{}' (ticket {} epoch {}, pending {:?} epoch {})",
                ticket.body_id,
                ticket.id,
                ticket.epoch,
                self.panel.pending,
                self.panel.epoch
            );
            return false;
        }
        let message = match outcome {
            Ok(text) if !text.trim().is_empty() => ChatMessage::model(text),
            Ok(_) => ChatMessage::model(prompt::empty_answer(ticket.language)),
            Err(e) => {
                log::error!("ask about '{}' failed: {e}", ticket.body_id);
                ChatMessage::error(prompt::failure_answer(ticket.language))
            }
        };
        self.panel.transcript.push(message);
        self.panel.pending = None;
        true
    }

    /// Render the scene at time `t` with the current view state.
    pub fn render(&self, t: f64) -> String {
        render_svg(&self.scene, t, &self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explorer() -> Explorer {
        Explorer::new(Scene::solar_system())
    }

    #[test]
    fn ask_about_earth_end_to_end() {
        let mut ex = explorer();
        ex.set_language(Language::En);
        assert!(ex.select("earth"));
        let earth = ex.selected_body().unwrap();
        assert_eq!(earth.semi_major_axis, 140.0);
        assert_eq!(earth.eccentricity, 0.0167);

        let ticket = ex.submit("How old is the Moon?").unwrap();
        assert_eq!(ex.panel().transcript(), &[ChatMessage::user("How old is the Moon?")]);
        assert!(ex.panel().is_loading());
        assert!(ticket.prompt.contains("Earth"));

        assert!(ex.resolve(&ticket, Ok("About 4.5 billion years.".to_string())));
        let transcript = ex.panel().transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1], ChatMessage::model("About 4.5 billion years."));
        assert!(!ex.panel().is_loading());
    }

    #[test]
    fn answer_after_body_switch_is_discarded() {
        let mut ex = explorer();
        ex.select("earth");
        let ticket = ex.submit("Why is the sky blue?").unwrap();
        ex.select("mars");
        assert!(!ex.resolve(&ticket, Ok("Rayleigh scattering.".to_string())));
        assert!(ex.panel().transcript().is_empty());
        assert!(!ex.panel().is_loading());
    }

    #[test]
    fn language_change_resets_transcript_and_stales_tickets() {
        let mut ex = explorer();
        ex.select("saturn");
        let ticket = ex.submit("Rings?").unwrap();
        ex.toggle_language();
        assert!(ex.panel().transcript().is_empty());
        assert!(!ex.resolve(&ticket, Ok("Ice.".to_string())));
    }

    #[test]
    fn submit_is_blocked_while_loading_or_blank() {
        let mut ex = explorer();
        assert!(ex.submit("anything").is_none(), "nothing selected");
        ex.select("venus");
        assert!(ex.submit("   ").is_none());
        let _ticket = ex.submit("Hot?").unwrap();
        assert!(ex.submit("Again?").is_none());
        assert_eq!(ex.panel().transcript().len(), 1);
    }

    #[test]
    fn failures_and_empty_answers_fall_back() {
        let mut ex = explorer();
        ex.select("jupiter");
        let t1 = ex.submit("Storm?").unwrap();
        ex.resolve(&t1, Ok("  ".to_string()));
        let t2 = ex.submit("Moons?").unwrap();
        ex.resolve(&t2, Err(AskFailure::Status(500)));

        let transcript = ex.panel().transcript();
        assert_eq!(transcript[1], ChatMessage::model("星星现在保持沉默。"));
        assert_eq!(transcript[3], ChatMessage::error("深空通讯暂时中断，请稍后再试。"));
    }

    #[test]
    fn ticket_resolves_at_most_once() {
        let mut ex = explorer();
        ex.select("earth");
        let ticket = ex.submit("Tides?").unwrap();
        assert!(ex.resolve(&ticket, Ok("The Moon.".to_string())));
        assert!(!ex.resolve(&ticket, Ok("The Moon.".to_string())));
        assert_eq!(ex.panel().transcript().len(), 2);
        assert!(!ex.panel().is_loading());
    }

    #[test]
    fn late_answer_does_not_answer_next_question() {
        let mut ex = explorer();
        ex.select("earth");
        let t1 = ex.submit("First?").unwrap();
        assert!(ex.resolve(&t1, Ok("One.".to_string())));
        let t2 = ex.submit("Second?").unwrap();
        assert_ne!(t1.id, t2.id);

        assert!(!ex.resolve(&t1, Ok("late".to_string())));
        assert!(ex.panel().is_loading());
        assert!(ex.resolve(&t2, Ok("Two.".to_string())));

        let texts: Vec<&str> = ex.panel().transcript().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["First?", "One.", "Second?", "Two."]);
    }

    #[test]
    fn transcript_stores_trimmed_question() {
        let mut ex = explorer();
        ex.set_language(Language::En);
        ex.select("mars");
        let ticket = ex.submit("  Why red?\n").unwrap();
        assert_eq!(ex.panel().transcript(), &[ChatMessage::user("Why red?")]);
        assert!(ticket.prompt.contains("\"Why red?\""));
    }

    #[test]
    fn reselecting_same_body_keeps_transcript() {
        let mut ex = explorer();
        ex.select("earth");
        let ticket = ex.submit("Hi").unwrap();
        ex.select("earth");
        assert!(ex.resolve(&ticket, Ok("Hello".to_string())));
        assert!(!ex.select("vulcan"));
        assert_eq!(ex.view().selected.as_deref(), Some("earth"));
    }

    #[test]
    fn close_panel_clears_selection() {
        let mut ex = explorer();
        ex.select("pluto");
        ex.close_panel();
        assert!(ex.view().selected.is_none());
        assert!(ex.card().is_none());
    }

    #[test]
    fn click_selects_nearest_body() {
        let mut ex = explorer();
        let t = 4.0;
        let pos = ex.scene().position_of("mars", t).unwrap();
        assert_eq!(ex.click(t, pos).as_deref(), Some("mars"));
        assert_eq!(ex.view().selected.as_deref(), Some("mars"));
        assert!(ex.click(t, DVec2::new(640.0, 640.0)).is_none());
        assert_eq!(ex.view().selected.as_deref(), Some("mars"));
    }

    #[test]
    fn card_is_localized() {
        let mut ex = explorer();
        ex.select("earth");
        let card = ex.card().unwrap();
        assert_eq!(card.name, "地球");
        assert_eq!(card.orbit, "30s (模拟)");
        assert_eq!(card.photo.as_deref(), Some("/assets/renders/earth.png"));
    }

    #[test]
    fn hover_ignores_unknown_ids() {
        let mut ex = explorer();
        ex.hover(Some("earth"));
        assert_eq!(ex.view().hovered.as_deref(), Some("earth"));
        ex.hover(Some("nowhere"));
        assert!(ex.view().hovered.is_none());
    }
}
