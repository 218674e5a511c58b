//! Price calculator.
//!
//! The total is a sum of independent terms, each applied only when its
//! inputs are present and known to the catalog. Nothing here can fail: an
//! in-progress configuration simply prices lower until it is filled in.

use serde::Serialize;

use crate::catalog::{Catalog, OptionCategory};
use crate::configuration::HouseConfiguration;
use crate::types::Price;

/// Which term of the estimate a [`PriceLine`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceComponent {
    Location,
    Style,
    SquareFootage,
    Bedrooms,
    Bathrooms,
    ExteriorColor,
    RoofType,
    Flooring,
    KitchenStyle,
    Pool,
    Garage,
    GarageExtraSpaces,
    Deck,
    Fireplace,
    Landscape,
}

/// One applied term of the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceLine {
    pub component: PriceComponent,
    pub amount: Price,
}

/// Itemised estimate. `total` is the sum of `lines`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub total: Price,
    pub lines: Vec<PriceLine>,
}

impl PriceBreakdown {
    /// Amount contributed by `component`, or `0.0` if it did not apply.
    pub fn amount(&self, component: PriceComponent) -> Price {
        self.lines
            .iter()
            .filter(|l| l.component == component)
            .map(|l| l.amount)
            .sum()
    }
}

/// Total estimated price of `config`.
pub fn calculate_price(config: &HouseConfiguration, catalog: &Catalog) -> Price {
    price_breakdown(config, catalog).total
}

/// Itemised estimate of `config`, in a fixed component order.
pub fn price_breakdown(config: &HouseConfiguration, catalog: &Catalog) -> PriceBreakdown {
    let mut lines = Vec::new();
    let mut push = |component: PriceComponent, amount: Option<Price>| {
        if let Some(amount) = amount {
            lines.push(PriceLine { component, amount });
        }
    };

    let lookup = |category: OptionCategory, value: &Option<String>| {
        value
            .as_deref()
            .and_then(|v| catalog.price_of(category, v))
    };

    let square_feet = units(config.square_feet);
    let amenities = catalog.amenities();

    push(
        PriceComponent::Location,
        lookup(OptionCategory::Location, &config.location),
    );
    push(
        PriceComponent::Style,
        lookup(OptionCategory::Style, &config.style),
    );
    push(
        PriceComponent::SquareFootage,
        square_feet.map(|sq| sq * catalog.square_foot_rate()),
    );
    push(
        PriceComponent::Bedrooms,
        units(config.bedrooms).map(|n| n * catalog.bedroom_rate()),
    );
    push(
        PriceComponent::Bathrooms,
        units(config.bathrooms).map(|n| n * catalog.bathroom_rate()),
    );
    push(
        PriceComponent::ExteriorColor,
        lookup(OptionCategory::ExteriorColor, &config.exterior_color),
    );
    push(
        PriceComponent::RoofType,
        lookup(OptionCategory::RoofType, &config.roof_type),
    );
    // Flooring is priced per square foot, so it needs both inputs.
    push(
        PriceComponent::Flooring,
        lookup(OptionCategory::FlooringType, &config.flooring_type)
            .zip(square_feet)
            .map(|(rate, sq)| rate * sq),
    );
    push(
        PriceComponent::KitchenStyle,
        lookup(OptionCategory::KitchenStyle, &config.kitchen_style),
    );
    push(
        PriceComponent::Pool,
        config.has_pool.then_some(amenities.pool),
    );
    if config.has_garage {
        push(PriceComponent::Garage, Some(amenities.garage));
        // The first space is part of the base garage price.
        push(
            PriceComponent::GarageExtraSpaces,
            config
                .garage_spaces
                .filter(|&n| n > 1)
                .map(|n| (n - 1) as Price * amenities.garage_extra_space_rate),
        );
    }
    push(
        PriceComponent::Deck,
        config.has_deck.then_some(amenities.deck),
    );
    push(
        PriceComponent::Fireplace,
        config.has_fireplace.then_some(amenities.fireplace),
    );
    push(
        PriceComponent::Landscape,
        lookup(OptionCategory::LandscapeType, &config.landscape_type),
    );

    let total = lines.iter().map(|l| l.amount).sum();
    PriceBreakdown { total, lines }
}

/// Negative counts are malformed input and price as absent.
fn units(count: Option<i64>) -> Option<Price> {
    count.filter(|&n| n >= 0).map(|n| n as Price)
}
