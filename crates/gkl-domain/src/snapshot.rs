//! Per-fund input snapshot
//!
//! Everything one pipeline run consumes, gathered by the persistence
//! collaborator: registry entries plus the manager, deal, and obligation
//! feeds. The engine never reaches outside a snapshot: fund scoping is
//! structural, not enforced at query time.

use crate::feeds::{DealRecord, ManagerProfile};
use crate::ids::FundId;
use crate::obligation::ObligationRegisterEntry;
use crate::registry::DocumentRegistryEntry;
use serde::{Deserialize, Serialize};

/// All source rows for one fund's pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundSnapshot {
    /// The fund scope every row belongs to
    pub fund: FundId,
    /// Registry entries observed by the scanner
    pub documents: Vec<DocumentRegistryEntry>,
    /// Manager profile feed
    pub managers: Vec<ManagerProfile>,
    /// Deal feed
    pub deals: Vec<DealRecord>,
    /// Obligation register feed
    pub obligations: Vec<ObligationRegisterEntry>,
}

impl FundSnapshot {
    /// Empty snapshot for a fund
    #[must_use]
    pub fn new(fund: FundId) -> Self {
        Self {
            fund,
            documents: Vec::new(),
            managers: Vec::new(),
            deals: Vec::new(),
            obligations: Vec::new(),
        }
    }

    /// With a registry entry
    #[inline]
    #[must_use]
    pub fn with_document(mut self, entry: DocumentRegistryEntry) -> Self {
        self.documents.push(entry);
        self
    }

    /// With a manager profile
    #[inline]
    #[must_use]
    pub fn with_manager(mut self, manager: ManagerProfile) -> Self {
        self.managers.push(manager);
        self
    }

    /// With a deal record
    #[inline]
    #[must_use]
    pub fn with_deal(mut self, deal: DealRecord) -> Self {
        self.deals.push(deal);
        self
    }

    /// With an obligation register row
    #[inline]
    #[must_use]
    pub fn with_obligation(mut self, obligation: ObligationRegisterEntry) -> Self {
        self.obligations.push(obligation);
        self
    }

    /// Registry entries currently in scope for linking
    pub fn active_documents(&self) -> impl Iterator<Item = &DocumentRegistryEntry> {
        self.documents.iter().filter(|d| d.is_active())
    }
}
