pub mod pipeline;
pub mod proposal;

pub use pipeline::{calculate_settlement, HeirSettlementShare, SettlementInput, SettlementOutput};
pub use proposal::{
    derive_offers, split_heirs, validate_quotas, HeirQuota, HeirShare, ManualOffer, OfferInput,
    ProposalOutput,
};
