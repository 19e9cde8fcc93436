use std::{cell::RefCell, rc::Rc};

use web_sys::{Document, Element};

use super::dom::{install_style, query_all, set_style, OnceObserver};
use crate::{
    config::RevealGroup,
    error::{FxError, Result},
    reveal::{
        already_revealed, HiddenStyle, RevealLedger, REVEALED_CLASS, REVEALED_RULE,
        REVEALED_STYLE_ID,
    },
};

/// One reveal group: hides its targets and fades each in on first sight.
pub struct RevealController {
    ledger: Rc<RefCell<RevealLedger>>,
    _observer: OnceObserver,
}

/// Elements that were revealed by an earlier run are neither hidden nor observed again.
fn collect_targets(document: &Document, group: &RevealGroup) -> Result<Vec<Element>> {
    let matched: Vec<Element> = if group.first_match_only {
        group
            .selectors
            .iter()
            .filter_map(|selector| document.query_selector(selector).ok().flatten())
            .collect()
    } else {
        query_all(document, &group.joined_selector())?
    };

    Ok(matched
        .into_iter()
        .filter(|element| !already_revealed(element.get_attribute("class").as_deref()))
        .collect())
}

impl RevealController {
    pub fn init(document: &Document, group: &RevealGroup) -> Result<Self> {
        let targets = collect_targets(document, group)?;
        if targets.is_empty() {
            return Err(FxError::MissingElement(group.joined_selector()));
        }

        if group.inline_styles {
            install_style(document, REVEALED_STYLE_ID, REVEALED_RULE)?;
            for (index, target) in targets.iter().enumerate() {
                let hidden = HiddenStyle::for_target(group, index);
                set_style(target, "opacity", hidden.opacity)?;
                set_style(target, "transform", &hidden.transform)?;
                set_style(target, "transition", &hidden.transition)?;
            }
        }

        let ledger = Rc::new(RefCell::new(RevealLedger::with_targets(targets.len())));
        let observer = {
            let ledger = Rc::clone(&ledger);
            OnceObserver::new(
                targets,
                group.threshold,
                &group.root_margin,
                move |index, target| {
                    if ledger.borrow_mut().mark(index) {
                        let _ = target.class_list().add_1(REVEALED_CLASS);
                    }
                },
            )?
        };

        tracing::debug!(
            selector = %group.joined_selector(),
            targets = ledger.borrow().target_count(),
            "reveal group armed"
        );

        Ok(Self {
            ledger,
            _observer: observer,
        })
    }

    pub fn pending(&self) -> usize {
        self.ledger.borrow().pending()
    }
}
