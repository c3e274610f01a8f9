//! Presentation adapter.
//!
//! Turns catalog and cart state into view models for the templates, and turns
//! UI events into cart, tab, and contact operations. Nothing here touches I/O:
//! the caller loads state, calls [`Presenter::dispatch`], saves state, and
//! renders the views again.

use serde::Serialize;

use crate::cart::{CartOutcome, CartStore};
use crate::catalog::{Catalog, Product};
use crate::contact::{ContactAck, ContactError};
use crate::tabs::{Selection, TabGroup, TabSet};
use crate::types::{ProductId, TabGroupId, TabId};

/// A product card in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCardView {
    pub id: String,
    pub tag: String,
    pub image: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub weight_label: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            tag: product.tag.clone(),
            image: product.image.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            weight_label: bag_label(product),
        }
    }
}

/// One row of the cart list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub weight_label: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Everything the cart panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub total_weight: String,
    pub item_count: u64,
    pub is_empty: bool,
    pub checkout_enabled: bool,
}

impl CartView {
    /// Shown in place of the line list when the cart is empty.
    pub const EMPTY_MESSAGE: &'static str = "Cart is empty. Add your first bag!";

    /// [`Self::EMPTY_MESSAGE`], callable from templates.
    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        Self::EMPTY_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub id: String,
    pub label: String,
    pub panel: String,
    pub active: bool,
    pub panel_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabGroupView {
    pub id: String,
    pub tabs: Vec<TabView>,
}

impl From<&TabGroup> for TabGroupView {
    fn from(group: &TabGroup) -> Self {
        Self {
            id: group.id().to_string(),
            tabs: group
                .tabs()
                .iter()
                .map(|tab| {
                    let active = group.is_active(tab.id.as_str());
                    TabView {
                        id: tab.id.to_string(),
                        label: tab.label.clone(),
                        panel: tab.panel.clone(),
                        active,
                        panel_hidden: !active,
                    }
                })
                .collect(),
        }
    }
}

/// Read-only checkout confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub item_count: u64,
}

impl CheckoutSummary {
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "We'll send a secure invoice for {} item(s).",
            self.item_count
        )
    }
}

/// A user interaction, already decoded from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    AddToCart(ProductId),
    IncreaseQuantity(ProductId),
    DecreaseQuantity(ProductId),
    RemoveFromCart(ProductId),
    Checkout,
    SubmitContact { name: String },
    SelectTab { group: TabGroupId, tab: TabId },
}

impl UiEvent {
    /// Short label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "add_to_cart",
            Self::IncreaseQuantity(_) => "increase_quantity",
            Self::DecreaseQuantity(_) => "decrease_quantity",
            Self::RemoveFromCart(_) => "remove_from_cart",
            Self::Checkout => "checkout",
            Self::SubmitContact { .. } => "submit_contact",
            Self::SelectTab { .. } => "select_tab",
        }
    }
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A cart operation ran.
    Cart(CartOutcome),
    /// Checkout summary for a non-empty cart.
    Checkout(CheckoutSummary),
    /// Checkout was requested on an empty cart.
    CheckoutUnavailable,
    /// Contact form result; on success the form should be cleared.
    Contact(Result<ContactAck, ContactError>),
    /// A tab selection ran.
    Tab(Selection),
}

impl Effect {
    /// Whether the cart must be written back to storage.
    #[must_use]
    pub const fn cart_changed(&self) -> bool {
        matches!(self, Self::Cart(CartOutcome::Updated))
    }
}

/// Maps state to views and events to operations for one catalog.
#[derive(Debug, Clone, Copy)]
pub struct Presenter<'a> {
    catalog: &'a Catalog,
}

impl<'a> Presenter<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Product cards in catalog order.
    #[must_use]
    pub fn product_grid(&self) -> Vec<ProductCardView> {
        self.catalog
            .products()
            .iter()
            .map(ProductCardView::from)
            .collect()
    }

    /// Cart panel for the given cart.
    #[must_use]
    pub fn cart(&self, cart: &CartStore) -> CartView {
        let lines: Vec<CartLineView> = cart
            .lines()
            .iter()
            .filter_map(|line| {
                let product = self.catalog.find(line.product_id().as_str())?;
                Some(CartLineView {
                    id: product.id.to_string(),
                    name: product.name.clone(),
                    weight_label: bag_label(product),
                    quantity: line.quantity(),
                    line_total: (product.price * line.quantity()).display(),
                })
            })
            .collect();
        let is_empty = lines.is_empty();

        CartView {
            lines,
            subtotal: cart.subtotal(self.catalog).display(),
            total_weight: cart.total_weight(self.catalog).to_string(),
            item_count: cart.item_count(),
            is_empty,
            checkout_enabled: !is_empty,
        }
    }

    /// Tab groups with their active/hidden flags.
    #[must_use]
    pub fn tabs(&self, tabs: &TabSet) -> Vec<TabGroupView> {
        tabs.groups().iter().map(TabGroupView::from).collect()
    }

    /// Apply an event to the cart or tab state.
    pub fn dispatch(&self, event: UiEvent, cart: &mut CartStore, tabs: &mut TabSet) -> Effect {
        match event {
            UiEvent::AddToCart(id) => Effect::Cart(cart.add_item(self.catalog, id.as_str())),
            UiEvent::IncreaseQuantity(id) => Effect::Cart(cart.change_quantity(id.as_str(), 1)),
            UiEvent::DecreaseQuantity(id) => Effect::Cart(cart.change_quantity(id.as_str(), -1)),
            UiEvent::RemoveFromCart(id) => Effect::Cart(cart.remove_item(id.as_str())),
            UiEvent::Checkout => {
                if cart.is_empty() {
                    Effect::CheckoutUnavailable
                } else {
                    Effect::Checkout(CheckoutSummary {
                        item_count: cart.item_count(),
                    })
                }
            }
            UiEvent::SubmitContact { name } => Effect::Contact(ContactAck::new(&name)),
            UiEvent::SelectTab { group, tab } => {
                Effect::Tab(tabs.select(group.as_str(), tab.as_str()))
            }
        }
    }
}

/// `"5 lb bag"`.
fn bag_label(product: &Product) -> String {
    format!("{} bag", product.weight)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tabs::Tab;

    fn tab_set() -> TabSet {
        TabSet::new(vec![
            TabGroup::new(
                "guides",
                vec![
                    Tab::new("rates", "Rates", "Rates panel"),
                    Tab::new("delivery", "Delivery", "Delivery panel"),
                ],
            )
            .unwrap(),
        ])
    }

    fn add(id: &str) -> UiEvent {
        UiEvent::AddToCart(ProductId::new(id))
    }

    #[test]
    fn test_product_grid_views() {
        let catalog = Catalog::default();
        let grid = Presenter::new(&catalog).product_grid();
        assert_eq!(grid.len(), 4);
        let bulk = grid.last().unwrap();
        assert_eq!(bulk.id, "bulk");
        assert_eq!(bulk.price, "$480.00");
        assert_eq!(bulk.weight_label, "1000 lb bag");
        assert_eq!(bulk.tag, "Wholesale");
    }

    #[test]
    fn test_empty_cart_view() {
        let catalog = Catalog::default();
        let view = Presenter::new(&catalog).cart(&CartStore::new());
        assert!(view.is_empty);
        assert!(!view.checkout_enabled);
        assert!(view.lines.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.total_weight, "0 lb");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_event_table_drives_cart() {
        let catalog = Catalog::default();
        let presenter = Presenter::new(&catalog);
        let mut cart = CartStore::new();
        let mut tabs = tab_set();

        for event in [add("starter"), add("grower"), add("starter")] {
            assert!(presenter.dispatch(event, &mut cart, &mut tabs).cart_changed());
        }
        let effect = presenter.dispatch(
            UiEvent::IncreaseQuantity(ProductId::new("grower")),
            &mut cart,
            &mut tabs,
        );
        assert_eq!(effect, Effect::Cart(CartOutcome::Updated));
        let _ = presenter.dispatch(
            UiEvent::DecreaseQuantity(ProductId::new("grower")),
            &mut cart,
            &mut tabs,
        );

        let view = presenter.cart(&cart);
        assert_eq!(view.subtotal, "$117.00");
        assert_eq!(view.total_weight, "30 lb");
        assert_eq!(view.item_count, 3);
        assert!(view.checkout_enabled);
        assert_eq!(view.lines[0].id, "starter");
        assert_eq!(view.lines[0].quantity, 2);
        assert_eq!(view.lines[0].line_total, "$48.00");
        assert_eq!(view.lines[1].weight_label, "20 lb bag");
    }

    #[test]
    fn test_stale_event_reports_not_found() {
        let catalog = Catalog::default();
        let presenter = Presenter::new(&catalog);
        let mut cart = CartStore::new();
        let mut tabs = tab_set();

        let effect = presenter.dispatch(
            UiEvent::RemoveFromCart(ProductId::new("starter")),
            &mut cart,
            &mut tabs,
        );
        assert_eq!(effect, Effect::Cart(CartOutcome::NotFound));
        assert!(!effect.cart_changed());
        assert_eq!(
            presenter.dispatch(add("mulch"), &mut cart, &mut tabs),
            Effect::Cart(CartOutcome::NotFound)
        );
    }

    #[test]
    fn test_remove_only_line_restores_empty_view() {
        let catalog = Catalog::default();
        let presenter = Presenter::new(&catalog);
        let mut cart = CartStore::new();
        let mut tabs = tab_set();

        let _ = presenter.dispatch(add("compost"), &mut cart, &mut tabs);
        let _ = presenter.dispatch(
            UiEvent::RemoveFromCart(ProductId::new("compost")),
            &mut cart,
            &mut tabs,
        );
        assert_eq!(presenter.cart(&cart), presenter.cart(&CartStore::new()));
    }

    #[test]
    fn test_checkout_summary_is_read_only() {
        let catalog = Catalog::default();
        let presenter = Presenter::new(&catalog);
        let mut cart = CartStore::new();
        let mut tabs = tab_set();

        assert_eq!(
            presenter.dispatch(UiEvent::Checkout, &mut cart, &mut tabs),
            Effect::CheckoutUnavailable
        );

        let _ = presenter.dispatch(add("bulk"), &mut cart, &mut tabs);
        let _ = presenter.dispatch(add("bulk"), &mut cart, &mut tabs);
        let before = cart.clone();
        let effect = presenter.dispatch(UiEvent::Checkout, &mut cart, &mut tabs);
        let Effect::Checkout(summary) = &effect else {
            panic!("expected checkout summary, got {effect:?}");
        };
        assert_eq!(summary.item_count, 2);
        assert_eq!(
            summary.message(),
            "We'll send a secure invoice for 2 item(s)."
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_contact_event() {
        let catalog = Catalog::default();
        let presenter = Presenter::new(&catalog);
        let mut cart = CartStore::new();
        let mut tabs = tab_set();

        let effect = presenter.dispatch(
            UiEvent::SubmitContact {
                name: " Rosa ".to_string(),
            },
            &mut cart,
            &mut tabs,
        );
        let Effect::Contact(Ok(ack)) = &effect else {
            panic!("expected acknowledgment, got {effect:?}");
        };
        assert_eq!(ack.message(), "Thanks, Rosa! We'll reach out shortly.");

        assert_eq!(
            presenter.dispatch(
                UiEvent::SubmitContact {
                    name: String::new()
                },
                &mut cart,
                &mut tabs
            ),
            Effect::Contact(Err(ContactError::MissingName))
        );
    }

    #[test]
    fn test_tab_views_toggle_panels() {
        let catalog = Catalog::default();
        let presenter = Presenter::new(&catalog);
        let mut cart = CartStore::new();
        let mut tabs = tab_set();

        let effect = presenter.dispatch(
            UiEvent::SelectTab {
                group: TabGroupId::new("guides"),
                tab: TabId::new("delivery"),
            },
            &mut cart,
            &mut tabs,
        );
        assert_eq!(effect, Effect::Tab(Selection::Activated));

        let views = presenter.tabs(&tabs);
        let guides = &views[0];
        let active: Vec<&str> = guides
            .tabs
            .iter()
            .filter(|t| t.active)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(active, ["delivery"]);
        assert!(guides.tabs.iter().all(|t| t.panel_hidden != t.active));
    }
}
