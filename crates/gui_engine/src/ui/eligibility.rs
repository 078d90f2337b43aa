//! Active and non-passive list maintenance
//!
//! Each container keeps `active` and `non_passive` as filtered views of its
//! `children`. An element is passive when its widget does not want input and
//! none of its active children are non-passive. A change is pushed upward one
//! container at a time and stops at the first element whose passive flag
//! comes out unchanged, so the walk is bounded by tree depth.

use log::trace;

use super::element::Container;
use super::error::UIResult;
use super::system::UISystem;
use super::ElementId;

impl UISystem {
    /// Show or hide an element and its subtree without destroying it
    pub fn set_active(&mut self, id: ElementId, active: bool) -> UIResult<()> {
        let node = self.node_mut(id)?;
        if node.active == active {
            return Ok(());
        }
        node.active = active;
        let container = Container::from(node.parent);
        trace!("{:?} active = {}", id, active);

        self.propagate_eligibility(container);
        self.replay_pointer();
        Ok(())
    }

    /// Rebuild one container's filtered lists from `children`.
    ///
    /// If the hovered child drops out of `non_passive`, its hover chain is
    /// cleared (mouse-out fired) before the new lists are stored. Otherwise
    /// the hover index follows the child by identity.
    pub(crate) fn refresh_lists(&mut self, container: Container) {
        let Some(lists) = self.lists(container) else { return };
        let hovered = lists.mouse_over();

        let active: Vec<ElementId> = lists
            .children
            .iter()
            .copied()
            .filter(|child| self.elements.get(*child).is_some_and(|node| node.active))
            .collect();
        let non_passive: Vec<ElementId> = active
            .iter()
            .copied()
            .filter(|child| self.elements.get(*child).is_some_and(|node| !node.passive))
            .collect();
        let mouse_over = hovered.and_then(|h| non_passive.iter().position(|child| *child == h));

        if let (Some(lost), None) = (hovered, mouse_over) {
            self.clear_hover_chain(lost);
        }
        if let Some(lists) = self.lists_mut(container) {
            lists.active = active;
            lists.non_passive = non_passive;
            lists.mouse_over = mouse_over;
        }
    }

    /// Refresh `start` and walk upward while passive flags keep flipping
    pub(crate) fn propagate_eligibility(&mut self, start: Container) {
        let mut container = start;
        loop {
            self.refresh_lists(container);

            let Container::Element(id) = container else { break };
            let Some(node) = self.elements.get_mut(id) else { break };
            let passive = node.widget.is_intrinsically_passive() && node.lists.non_passive.is_empty();
            if passive == node.passive {
                break;
            }
            trace!("{:?} passive = {}", id, passive);
            node.passive = passive;
            container = Container::from(node.parent);
        }
    }
}
