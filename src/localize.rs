use std::sync::LazyLock;

use i18n_embed::{
    DefaultLocalizer, LanguageLoader, Localizer,
    fluent::{FluentLanguageLoader, fluent_language_loader},
    unic_langid::LanguageIdentifier,
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Localizations;

pub static LANGUAGE_LOADER: LazyLock<FluentLanguageLoader> = LazyLock::new(|| {
    let loader: FluentLanguageLoader = fluent_language_loader!();

    loader
        .load_fallback_language(&Localizations)
        .expect("Error while loading fallback language");
    // Plain terminal output, no bidi isolation marks around arguments
    loader.set_use_isolating(false);

    loader
});

#[macro_export]
macro_rules! fl {
    ($message_id:literal) => {{
        i18n_embed_fl::fl!($crate::localize::LANGUAGE_LOADER, $message_id)
    }};

    ($message_id:literal, $($args:expr),*) => {{
        i18n_embed_fl::fl!($crate::localize::LANGUAGE_LOADER, $message_id, $($args), *)
    }};
}

/// Get the `Localizer` to be used for localizing this application.
pub fn localizer() -> Box<dyn Localizer> {
    Box::from(DefaultLocalizer::new(&*LANGUAGE_LOADER, &Localizations))
}

/// Select the best language for the current desktop locale
pub fn localize() {
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();
    select(&requested_languages);
}

/// Load the best match among `languages`
///
/// Selecting rebuilds the Fluent bundles, which come back with isolation
/// marks enabled, so the setting is applied again afterwards.
pub fn select(languages: &[LanguageIdentifier]) {
    if let Err(error) = localizer().select(languages) {
        log::warn!("Error while loading language for essaymark: {}", error);
    }
    LANGUAGE_LOADER.set_use_isolating(false);
}
