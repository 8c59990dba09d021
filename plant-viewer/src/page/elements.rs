#[cfg(target_arch = "wasm32")]
use bevy::prelude::*;

use crate::error::ViewerError;

/// Fail on the first required element that does not exist.
pub fn verify_required_elements<F>(ids: &[&str], exists: F) -> Result<(), ViewerError>
where
    F: Fn(&str) -> bool,
{
    match ids.iter().find(|id| !exists(id)) {
        Some(missing) => Err(ViewerError::MissingDomElement(missing.to_string())),
        None => Ok(()),
    }
}

#[cfg(target_arch = "wasm32")]
fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|window| window.document())
}

#[cfg(target_arch = "wasm32")]
pub fn element_exists(id: &str) -> bool {
    document()
        .and_then(|document| document.get_element_by_id(id))
        .is_some()
}

/// Rendered text of an element, as the page shows it.
#[cfg(target_arch = "wasm32")]
pub fn element_text(id: &str) -> Option<String> {
    use wasm_bindgen::JsCast;

    document()?
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
        .map(|element| element.inner_text())
}

/// Startup check: the host page must provide every element the engine
/// reports to. A missing one stops the app.
#[cfg(target_arch = "wasm32")]
pub fn check_page_elements(mut exit: EventWriter<AppExit>) {
    use constants::page::REQUIRED_ELEMENT_IDS;
    use constants::speech::NARRATION_SECTION_IDS;

    let required = REQUIRED_ELEMENT_IDS
        .iter()
        .chain(NARRATION_SECTION_IDS.iter())
        .copied()
        .collect::<Vec<_>>();

    if let Err(e) = verify_required_elements(&required, element_exists) {
        error!("{}", e);
        exit.write(AppExit::error());
    } else {
        info!("All {} page elements present", required.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_first_missing_element() {
        let present = ["modelModal", "closeButton"];
        let result = verify_required_elements(
            &["modelModal", "searchBar", "voiceButton"],
            |id| present.contains(&id),
        );
        assert_eq!(
            result,
            Err(ViewerError::MissingDomElement("searchBar".to_string()))
        );
    }

    #[test]
    fn passes_when_everything_exists() {
        assert_eq!(
            verify_required_elements(constants::page::REQUIRED_ELEMENT_IDS, |_| true),
            Ok(())
        );
    }
}
