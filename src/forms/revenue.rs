//! Revenue-sharing form.
//!
//! One post configures both channels of a partner for a single bound. The
//! bound comes from `bound_type` (`inbound` or `outbound`, inbound when
//! absent). Channel fields carry the channel tag (`OTC`, `DIGITAL`) as a
//! suffix:
//!
//! - `Transaction{TAG}`: marker; absent means the rule is deleted
//! - `TierType{TAG}`: `percentage` or `tiered`
//! - `Percentage{TAG}`: flat share
//! - `TierCount{TAG}`: number of tier rows
//! - `MinTieredPercentage{TAG}{i}`, `MaxTieredPercentage{TAG}{i}`,
//!   `AmountTieredPercentage{TAG}{i}`: tier row `i`

use crate::forms::{FieldErrors, FormFields, FormReader, fee::partner_field};
use crate::models::{
    partner::PartnerType,
    revenue::{BoundType, RevenueSharingTier, TierType, TransactionChannel},
};

/// Bound used when the form does not say.
pub const DEFAULT_BOUND: BoundType = BoundType::Inbound;

/// What to do with one (bound, channel) rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleAction {
    Delete,
    Upsert {
        tier_type: TierType,
        percentage_hundredths: i64,
        tiers: Vec<RevenueSharingTier>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleChange {
    pub channel: TransactionChannel,
    pub action: RuleAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueSharingForm {
    pub partner: PartnerType,
    pub bound: BoundType,
    pub changes: Vec<RuleChange>,
}

/// Name of a revenue-sharing field for one channel.
pub fn field_name(field: &str, channel: TransactionChannel) -> String {
    format!("{field}{}", channel.form_tag())
}

fn bound_field(form: &mut FormReader<'_>) -> BoundType {
    let raw = form.optional("bound_type");
    if raw.is_empty() {
        return DEFAULT_BOUND;
    }
    BoundType::parse(&raw).unwrap_or_else(|| {
        form.error("bound_type", "Choose inbound or outbound");
        DEFAULT_BOUND
    })
}

/// Parse both channels; nothing is returned unless all of them validate.
pub fn parse_revenue_sharing(fields: &FormFields, max_rows: usize) -> Result<RevenueSharingForm, FieldErrors> {
    let mut form = FormReader::new(fields);
    let partner = partner_field(&mut form, "remit_type");
    let bound = bound_field(&mut form);

    let changes = TransactionChannel::ALL
        .iter()
        .map(|&channel| RuleChange {
            channel,
            action: parse_action(&mut form, channel, max_rows),
        })
        .collect();

    form.finish(RevenueSharingForm {
        partner,
        bound,
        changes,
    })
}

fn parse_action(form: &mut FormReader<'_>, channel: TransactionChannel, max_rows: usize) -> RuleAction {
    let name = |field: &str| field_name(field, channel);

    if !form.fields().has(&name("Transaction")) {
        return RuleAction::Delete;
    }

    let tier_type_field = name("TierType");
    let tier_type = TierType::parse(&form.required(&tier_type_field)).unwrap_or_else(|| {
        form.error(&tier_type_field, "Choose flat or tiered percentage");
        TierType::default()
    });

    match tier_type {
        TierType::Percentage => {
            let field = name("Percentage");
            let percentage_hundredths = form.hundredths(&field);
            if percentage_hundredths > 10_000 {
                form.error(&field, "Percentage cannot exceed 100%");
            }
            RuleAction::Upsert {
                tier_type,
                percentage_hundredths,
                tiers: Vec::new(),
            }
        }
        TierType::Tiered => {
            let count_field = name("TierCount");
            let count = form.count(&count_field, max_rows);
            if count == 0 && !form.has_error(&count_field) {
                form.error(&count_field, "Add at least one tier");
            }

            let mut tiers: Vec<RevenueSharingTier> = Vec::with_capacity(count);
            for i in 0..count {
                let min_field = format!("{}{i}", name("MinTieredPercentage"));
                let max_field = format!("{}{i}", name("MaxTieredPercentage"));
                let amount_field = format!("{}{i}", name("AmountTieredPercentage"));

                let min_cents = form.hundredths(&min_field);
                let max_cents = form.hundredths(&max_field);
                let amount_hundredths = form.hundredths(&amount_field);

                if !form.has_error(&min_field) && !form.has_error(&max_field) && min_cents >= max_cents {
                    form.error(&max_field, "Maximum must be greater than minimum");
                }
                if tiers.last().is_some_and(|previous| min_cents < previous.max_cents) {
                    form.error(&min_field, "Tiers must not overlap");
                }
                if amount_hundredths > 10_000 {
                    form.error(&amount_field, "Percentage cannot exceed 100%");
                }

                tiers.push(RevenueSharingTier {
                    min_cents,
                    max_cents,
                    amount_hundredths,
                });
            }

            RuleAction::Upsert {
                tier_type,
                percentage_hundredths: 0,
                tiers,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fields;

    #[test]
    fn absent_marker_deletes_rule() {
        let form = parse_revenue_sharing(
            &fields(&[
                ("remit_type", "WU"),
                ("bound_type", "outbound"),
                ("TransactionDIGITAL", "on"),
                ("TierTypeDIGITAL", "percentage"),
                ("PercentageDIGITAL", "12.5"),
            ]),
            50,
        )
        .unwrap();

        assert_eq!(form.bound, BoundType::Outbound);
        assert_eq!(form.changes.len(), 2);
        assert_eq!(form.changes[0].channel, TransactionChannel::Otc);
        assert_eq!(form.changes[0].action, RuleAction::Delete);
        assert_eq!(
            form.changes[1].action,
            RuleAction::Upsert {
                tier_type: TierType::Percentage,
                percentage_hundredths: 1250,
                tiers: vec![],
            }
        );
    }

    #[test]
    fn missing_bound_means_inbound() {
        let form = parse_revenue_sharing(&fields(&[("remit_type", "WU")]), 50).unwrap();
        assert_eq!(form.bound, BoundType::Inbound);
        assert!(form.changes.iter().all(|c| c.action == RuleAction::Delete));
    }

    #[test]
    fn unknown_bound_is_rejected() {
        let errors =
            parse_revenue_sharing(&fields(&[("remit_type", "WU"), ("bound_type", "sideways")]), 50).unwrap_err();
        assert!(errors.contains("bound_type"));
    }

    #[test]
    fn tiered_rows_are_read_by_index() {
        let form = parse_revenue_sharing(
            &fields(&[
                ("remit_type", "RIA"),
                ("TransactionOTC", "on"),
                ("TierTypeOTC", "tiered"),
                ("TierCountOTC", "2"),
                ("MinTieredPercentageOTC0", "0"),
                ("MaxTieredPercentageOTC0", "10000"),
                ("AmountTieredPercentageOTC0", "2"),
                ("MinTieredPercentageOTC1", "10000"),
                ("MaxTieredPercentageOTC1", "50000"),
                ("AmountTieredPercentageOTC1", "1.5"),
            ]),
            50,
        )
        .unwrap();

        let RuleAction::Upsert { tier_type, tiers, .. } = &form.changes[0].action else {
            panic!("expected upsert");
        };
        assert_eq!(*tier_type, TierType::Tiered);
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[1].amount_hundredths, 150);
        assert_eq!(tiers[1].max_cents, 5_000_000);
    }

    #[test]
    fn oversized_tier_count_is_rejected() {
        let errors = parse_revenue_sharing(
            &fields(&[
                ("remit_type", "WU"),
                ("TransactionOTC", "on"),
                ("TierTypeOTC", "tiered"),
                ("TierCountOTC", "100000"),
            ]),
            50,
        )
        .unwrap_err();
        assert!(errors.contains("TierCountOTC"));
    }

    #[test]
    fn unknown_partner_is_rejected() {
        let errors = parse_revenue_sharing(&fields(&[("remit_type", "NOPE")]), 50).unwrap_err();
        assert!(errors.contains("remit_type"));
    }
}
