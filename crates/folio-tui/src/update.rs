//! Reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)` and
//! executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::{self, OverlayRequest};
use crate::sections::Section;
use crate::state::{AppState, TuiState};

/// Lines moved by PageUp/PageDown.
const PAGE_SCROLL: u16 = 10;

/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Frame { width, height, now } => {
            let tui = &mut app.tui;
            tui.now = now;
            if (width, height) != (tui.width, tui.height) {
                tui.width = width;
                tui.height = height;
                tui.dirty = true;
            }
            vec![]
        }
        UiEvent::Tick => {
            if app.tui.poll_timers() {
                app.tui.dirty = true;
            }
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::ContactSent { result } => {
            app.tui.contact.on_sent(result);
            app.tui.dirty = true;
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            app.tui.dirty = true;
            handle_key(app, key)
        }
        Event::Paste(text) => {
            if app.overlay.is_none()
                && app.tui.section == Section::Contact
                && app.tui.contact.editing
            {
                app.tui.contact.handle_paste(&text);
                app.tui.dirty = true;
            }
            vec![]
        }
        Event::Resize(..) | Event::FocusGained => {
            app.tui.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return quit(&mut app.tui);
    }

    if let Some(effects) = overlays::handle_overlay_key(&mut app.tui, &mut app.overlay, key) {
        return effects;
    }

    let tui = &mut app.tui;
    if tui.section == Section::Contact && tui.contact.editing {
        return tui.contact.handle_key(key);
    }

    match key.code {
        KeyCode::Char('q') => quit(tui),
        KeyCode::Right | KeyCode::Tab => {
            tui.set_section(tui.section.next());
            vec![]
        }
        KeyCode::Left | KeyCode::BackTab => {
            tui.set_section(tui.section.prev());
            vec![]
        }
        KeyCode::Char(c @ '1'..='8') => {
            let index = usize::from(c as u8 - b'1');
            if let Some(section) = Section::from_index(index) {
                tui.set_section(section);
            }
            vec![]
        }
        KeyCode::Char('d') => {
            tui.theme = tui.theme.toggled();
            vec![UiEffect::PersistTheme { theme: tui.theme }]
        }
        KeyCode::Char('t') => {
            overlays::open_overlay(tui, &mut app.overlay, OverlayRequest::Terminal);
            vec![]
        }
        KeyCode::Char('h') if tui.section == Section::Testimonials => {
            tui.testimonials.carousel.prev();
            vec![]
        }
        KeyCode::Char('l') if tui.section == Section::Testimonials => {
            tui.testimonials.carousel.next();
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            move_cursor(tui, -1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_cursor(tui, 1);
            vec![]
        }
        KeyCode::PageUp => {
            tui.scroll = tui.scroll.saturating_sub(PAGE_SCROLL);
            vec![]
        }
        KeyCode::PageDown => {
            tui.scroll = tui
                .scroll
                .saturating_add(PAGE_SCROLL)
                .min(tui.scroll_limit.get());
            vec![]
        }
        KeyCode::Home | KeyCode::Char('g') => {
            tui.scroll = 0;
            vec![]
        }
        KeyCode::Enter => activate(tui, &mut app.overlay),
        _ => vec![],
    }
}

fn quit(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.should_quit = true;
    vec![UiEffect::Quit]
}

/// Moves the section's selection, or scrolls when it has none.
fn move_cursor(tui: &mut TuiState, delta: isize) {
    let portfolio = &tui.portfolio;
    let (cursor, len) = match tui.section {
        Section::Home => (&mut tui.selection.social, portfolio.social.len()),
        Section::Projects => (&mut tui.selection.project, portfolio.projects.len()),
        Section::Blog => (&mut tui.selection.post, portfolio.blog.len()),
        _ => {
            tui.scroll = if delta < 0 {
                tui.scroll.saturating_sub(1)
            } else {
                (tui.scroll + 1).min(tui.scroll_limit.get())
            };
            return;
        }
    };
    *cursor = cursor
        .saturating_add_signed(delta)
        .min(len.saturating_sub(1));
}

/// Enter on the main view.
fn activate(tui: &mut TuiState, overlay: &mut Option<overlays::Overlay>) -> Vec<UiEffect> {
    let url = match tui.section {
        Section::Home => tui
            .portfolio
            .social
            .get(tui.selection.social)
            .map(|link| link.url.clone()),
        Section::Projects => tui
            .portfolio
            .projects
            .get(tui.selection.project)
            .and_then(|p| p.primary_url())
            .map(str::to_string),
        Section::Blog => {
            if let Some(post) = tui.portfolio.blog.get(tui.selection.post) {
                let id = post.id;
                overlays::open_overlay(tui, overlay, OverlayRequest::BlogPost { id });
            }
            None
        }
        Section::Contact => {
            tui.contact.start_editing();
            None
        }
        _ => None,
    };
    url.map(|url| vec![UiEffect::OpenBrowser { url }])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use folio_core::config::Config;
    use folio_core::contact::Field;
    use folio_core::content::Portfolio;
    use folio_core::theme::Theme;

    use super::*;
    use crate::overlays::Overlay;
    use crate::sections::contact::ContactStatus;

    fn app() -> AppState {
        AppState::new(Config::default(), Portfolio::builtin().unwrap(), Instant::now()).unwrap()
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        press_with(app, code, KeyModifiers::NONE)
    }

    fn press_with(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers) -> Vec<UiEffect> {
        update(app, UiEvent::Terminal(Event::Key(KeyEvent::new(code, modifiers))))
    }

    fn advance(app: &mut AppState, by: Duration) {
        let now = app.tui.now + by;
        update(app, UiEvent::Frame { width: 120, height: 40, now });
        update(app, UiEvent::Tick);
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app();
        assert_eq!(press(&mut a, KeyCode::Char('q')), vec![UiEffect::Quit]);
        assert!(a.tui.should_quit);

        let mut b = app();
        let effects = press_with(&mut b, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(effects, vec![UiEffect::Quit]);
    }

    #[test]
    fn test_section_navigation_wraps() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.tui.section, Section::Contact);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.tui.section, Section::Home);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.tui.section, Section::Projects);
    }

    #[test]
    fn test_theme_toggle_persists() {
        let mut app = app();
        let effects = press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.tui.theme, Theme::Light);
        assert_eq!(effects, vec![UiEffect::PersistTheme { theme: Theme::Light }]);
    }

    #[test]
    fn test_terminal_modal_mounts_and_resets_on_close() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert!(matches!(app.overlay, Some(Overlay::Terminal(_))));
        assert!(app.tui.terminal.is_mounted());

        advance(&mut app, Duration::from_millis(1000));
        assert!(!app.tui.terminal.text().is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(app.overlay.is_none());
        assert!(!app.tui.terminal.is_mounted());
        assert_eq!(app.tui.terminal.text(), "");
        assert!(!app.tui.should_quit);
    }

    #[test]
    fn test_keys_go_to_overlay_while_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.tui.section, Section::Home);
        assert!(press(&mut app, KeyCode::Char('d')).is_empty());
        assert_eq!(app.tui.theme, Theme::Dark);
    }

    #[test]
    fn test_playground_types_only_on_about() {
        let mut app = app();
        advance(&mut app, Duration::from_millis(500));
        assert_eq!(app.tui.playground.text(), "");

        press(&mut app, KeyCode::Char('2'));
        advance(&mut app, Duration::from_millis(500));
        assert!(app.tui.playground.text().starts_with("const"));

        press(&mut app, KeyCode::Right);
        assert_eq!(app.tui.playground.text(), "");
        assert_eq!(app.tui.playground.next_deadline(), None);
    }

    #[test]
    fn test_testimonials_rotate_while_visible() {
        let mut app = app();
        press(&mut app, KeyCode::Char('6'));
        assert_eq!(app.tui.section, Section::Testimonials);

        advance(&mut app, Duration::from_millis(5000));
        assert_eq!(app.tui.testimonials.carousel.index(), 1);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.tui.testimonials.carousel.index(), 2);
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.tui.testimonials.carousel.index(), 0);

        press(&mut app, KeyCode::Right);
        advance(&mut app, Duration::from_millis(20_000));
        assert_eq!(app.tui.testimonials.carousel.index(), 0);
    }

    #[test]
    fn test_enter_opens_links() {
        let mut app = app();
        let effects = press(&mut app, KeyCode::Enter);
        let first = app.tui.portfolio.social[0].url.clone();
        assert_eq!(effects, vec![UiEffect::OpenBrowser { url: first }]);

        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Down);
        let effects = press(&mut app, KeyCode::Enter);
        let expected = app.tui.portfolio.projects[1].primary_url().unwrap().to_string();
        assert_eq!(effects, vec![UiEffect::OpenBrowser { url: expected }]);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tui.selection.social, 0);
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.tui.selection.social, app.tui.portfolio.social.len() - 1);
    }

    #[test]
    fn test_blog_enter_opens_post() {
        let mut app = app();
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let Some(Overlay::BlogPost(post)) = &app.overlay else {
            panic!("expected blog overlay");
        };
        assert_eq!(post.post_id, app.tui.portfolio.blog[1].id);

        press(&mut app, KeyCode::Esc);
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.section, Section::Blog);
    }

    #[test]
    fn test_scroll_clamps_to_render_limit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        app.tui.scroll_limit.set(2);
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.tui.scroll, 2);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.tui.scroll, 0);
    }

    #[test]
    fn test_contact_form_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('8'));
        press(&mut app, KeyCode::Enter);
        assert!(app.tui.contact.editing);

        // Global keys are text while editing.
        for c in "qd".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(!app.tui.should_quit);
        assert_eq!(app.tui.contact.form.value(Field::Name), "qd");

        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("hello".to_string())),
        );
        assert_eq!(app.tui.contact.form.value(Field::Name), "qdhello");

        let effects = press_with(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(matches!(effects.as_slice(), [UiEffect::SubmitContact { .. }]));

        update(&mut app, UiEvent::ContactSent { result: Ok(()) });
        assert!(app.tui.contact.form.is_empty());
        assert_eq!(app.tui.contact.status, ContactStatus::Sent);
    }

    #[test]
    fn test_leaving_contact_stops_editing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('8'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert!(!app.tui.contact.editing);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.tui.section, Section::Home);
    }
}
