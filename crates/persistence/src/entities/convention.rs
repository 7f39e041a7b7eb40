//! Convention entity (database row mapping).
//!
//! The monthly overrides are stored as twelve discrete nullable columns, so
//! the full-replace-on-update contract is structural: every write sets all
//! twelve.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use domain::models::{Convention, MonthlyPrices};

/// Database row mapping for the conventions table.
#[derive(Debug, Clone, FromRow)]
pub struct ConventionEntity {
    pub id: i64,
    pub client_id: i64,
    pub category_id: i64,
    pub hotel_id: Option<i64>,
    pub validity_start: NaiveDate,
    pub validity_end: Option<NaiveDate>,
    pub default_price: Decimal,
    pub price_january: Option<Decimal>,
    pub price_february: Option<Decimal>,
    pub price_march: Option<Decimal>,
    pub price_april: Option<Decimal>,
    pub price_may: Option<Decimal>,
    pub price_june: Option<Decimal>,
    pub price_july: Option<Decimal>,
    pub price_august: Option<Decimal>,
    pub price_september: Option<Decimal>,
    pub price_october: Option<Decimal>,
    pub price_november: Option<Decimal>,
    pub price_december: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub flat_monthly_rate: Option<Decimal>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ConventionEntity> for Convention {
    fn from(entity: ConventionEntity) -> Self {
        Self {
            id: entity.id,
            client_id: entity.client_id,
            category_id: entity.category_id,
            hotel_id: entity.hotel_id,
            validity_start: entity.validity_start,
            validity_end: entity.validity_end,
            default_price: entity.default_price,
            monthly_prices: MonthlyPrices {
                january: entity.price_january,
                february: entity.price_february,
                march: entity.price_march,
                april: entity.price_april,
                may: entity.price_may,
                june: entity.price_june,
                july: entity.price_july,
                august: entity.price_august,
                september: entity.price_september,
                october: entity.price_october,
                november: entity.price_november,
                december: entity.price_december,
            },
            discount_percent: entity.discount_percent,
            flat_monthly_rate: entity.flat_monthly_rate,
            notes: entity.notes,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_test_entity() -> ConventionEntity {
        ConventionEntity {
            id: 1,
            client_id: 11,
            category_id: 1,
            hotel_id: Some(1),
            validity_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            validity_end: Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
            default_price: dec!(100),
            price_january: Some(dec!(90)),
            price_february: None,
            price_march: None,
            price_april: None,
            price_may: None,
            price_june: None,
            price_july: Some(dec!(130)),
            price_august: None,
            price_september: None,
            price_october: None,
            price_november: None,
            price_december: None,
            discount_percent: Some(dec!(10)),
            flat_monthly_rate: None,
            notes: Some("Corporate rate".to_string()),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_entity_to_domain() {
        let entity = create_test_entity();
        let convention: Convention = entity.clone().into();

        assert_eq!(convention.id, entity.id);
        assert_eq!(convention.client_id, entity.client_id);
        assert_eq!(convention.category_id, entity.category_id);
        assert_eq!(convention.default_price, dec!(100));
        assert_eq!(convention.monthly_prices.january, Some(dec!(90)));
        assert_eq!(convention.monthly_prices.july, Some(dec!(130)));
        assert_eq!(convention.monthly_prices.march, None);
        assert_eq!(convention.discount_percent, Some(dec!(10)));
        assert!(convention.active);
    }

    #[test]
    fn test_entity_to_domain_open_ended_window() {
        let mut entity = create_test_entity();
        entity.validity_end = None;

        let convention: Convention = entity.into();
        assert_eq!(convention.validity_end, None);
    }

    #[test]
    fn test_entity_to_domain_flat_rate() {
        let mut entity = create_test_entity();
        entity.flat_monthly_rate = Some(dec!(1800));

        let convention: Convention = entity.into();
        assert_eq!(convention.flat_monthly_rate, Some(dec!(1800)));
    }
}
