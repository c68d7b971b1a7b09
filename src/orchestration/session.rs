use crate::domain::{Decimal, FeeConfig, LotBook, LotField};
use crate::engine::{build_report, compute_aggregate, compute_profit_at_percentage};
use crate::engine::{CalculatorReport, ProfitProjection};
use crate::store::{self, keys, KeyValueStore, StoreError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Raw calculator inputs: the only state that is ever mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub lots: LotBook,
    pub fees: FeeConfig,
    pub custom_profit: String,
    pub desired_price: String,
}

impl SessionState {
    fn report(&self) -> CalculatorReport {
        debug!("Recomputing report over {} lots", self.lots.len());
        build_report(&self.lots, &self.fees, &self.custom_profit, &self.desired_price)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No lot at index {index} (book has {len} lots)")]
    LotNotFound { index: usize, len: usize },
}

/// The single calculator session: applies edits, recomputes everything and
/// writes changed inputs back to the store.
///
/// Edits are serialized by one lock, which is also held across the write-back
/// so stored values follow edit order.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
}

impl Session {
    /// Restore persisted inputs from `store`; fees are not persisted.
    pub async fn load(store: Arc<dyn KeyValueStore>, fees: FeeConfig) -> Result<Self, StoreError> {
        let lots = store::get_or(store.as_ref(), keys::PURCHASES, LotBook::new()).await?;
        let custom_profit =
            store::get_or(store.as_ref(), keys::CUSTOM_PROFIT, String::new()).await?;
        let desired_price =
            store::get_or(store.as_ref(), keys::DESIRED_PRICE, String::new()).await?;

        info!("Session loaded with {} lots", lots.len());

        Ok(Self {
            store,
            state: Mutex::new(SessionState {
                lots,
                fees,
                custom_profit,
                desired_price,
            }),
        })
    }

    pub async fn report(&self) -> CalculatorReport {
        self.state.lock().await.report()
    }

    /// Copy of the current raw inputs.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn fees(&self) -> FeeConfig {
        self.state.lock().await.fees
    }

    /// Set one field of the lot at `index`.
    pub async fn update_lot(
        &self,
        index: usize,
        field: LotField,
        value: String,
    ) -> Result<CalculatorReport, SessionError> {
        let (price, quantity) = match field {
            LotField::Price => (Some(value), None),
            LotField::Quantity => (None, Some(value)),
        };
        self.update_lot_fields(index, price, quantity).await
    }

    /// Set any of the fields of the lot at `index` in one edit.
    pub async fn update_lot_fields(
        &self,
        index: usize,
        price: Option<String>,
        quantity: Option<String>,
    ) -> Result<CalculatorReport, SessionError> {
        let mut state = self.state.lock().await;
        let len = state.lots.len();
        if index >= len {
            return Err(SessionError::LotNotFound { index, len });
        }

        if let Some(price) = price {
            state.lots.set_field(index, LotField::Price, price);
        }
        if let Some(quantity) = quantity {
            state.lots.set_field(index, LotField::Quantity, quantity);
        }

        self.persist(keys::PURCHASES, &state.lots).await;
        Ok(state.report())
    }

    /// Append a blank lot.
    pub async fn add_lot(&self) -> CalculatorReport {
        let mut state = self.state.lock().await;
        state.lots.push_blank();
        self.persist(keys::PURCHASES, &state.lots).await;
        state.report()
    }

    /// Remove the lot at `index`; a no-op when it is the only lot left.
    pub async fn remove_lot(&self, index: usize) -> Result<CalculatorReport, SessionError> {
        let mut state = self.state.lock().await;
        let len = state.lots.len();
        if index >= len {
            return Err(SessionError::LotNotFound { index, len });
        }

        if state.lots.remove(index).is_some() {
            self.persist(keys::PURCHASES, &state.lots).await;
        } else {
            debug!("Kept lot {}: the book cannot become empty", index);
        }
        Ok(state.report())
    }

    /// Reset the book to its blank default.
    pub async fn clear_lots(&self) -> CalculatorReport {
        let mut state = self.state.lock().await;
        state.lots.clear();
        self.persist(keys::PURCHASES, &state.lots).await;
        state.report()
    }

    pub async fn set_fees(&self, fees: FeeConfig) -> CalculatorReport {
        let mut state = self.state.lock().await;
        state.fees = fees;
        state.report()
    }

    pub async fn set_custom_profit(&self, value: String) -> CalculatorReport {
        let mut state = self.state.lock().await;
        state.custom_profit = value;
        self.persist(keys::CUSTOM_PROFIT, &state.custom_profit).await;
        state.report()
    }

    pub async fn set_desired_price(&self, value: String) -> CalculatorReport {
        let mut state = self.state.lock().await;
        state.desired_price = value;
        self.persist(keys::DESIRED_PRICE, &state.desired_price).await;
        state.report()
    }

    /// Projection at an arbitrary markup over the current lots.
    pub async fn projection_at(&self, percentage: Decimal) -> Option<ProfitProjection> {
        let state = self.state.lock().await;
        let aggregate = compute_aggregate(state.lots.lots(), &state.fees);
        compute_profit_at_percentage(&aggregate, percentage, &state.fees)
    }

    /// Write `value` under `key`. Failures are logged and otherwise ignored.
    async fn persist<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized + Sync,
    {
        match store::set(self.store.as_ref(), key, value).await {
            Ok(()) => debug!("Persisted {}", key),
            Err(e) => warn!("Failed to persist {}: {}", key, e),
        }
    }
}
