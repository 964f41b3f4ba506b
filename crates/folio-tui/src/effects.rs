//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer only mutates state and returns effects; it never performs I/O.

use folio_core::contact::ContactMessage;
use folio_core::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Open a URL in the system browser.
    OpenBrowser { url: String },

    /// Write the theme preference to the config file.
    PersistTheme { theme: Theme },

    /// Hand the contact form to the transport. The runtime answers with
    /// `UiEvent::ContactSent`.
    SubmitContact { message: ContactMessage },
}
