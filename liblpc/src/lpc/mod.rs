//! LPC analysis and synthesis
//!
//! Encoder side: pre-emphasis, Hanning window, autocorrelation, Levinson-Durbin
//! and the inverse (analysis) filter. Decoder side: bandwidth expansion, the
//! synthesis filter and de-emphasis. Everything here works on caller-supplied
//! buffers and never allocates, except the spectral envelope helper.

pub mod analyze;
pub mod autocorr;
pub mod emphasis;
pub mod filter;
pub mod history;
pub mod levinson;
pub mod spectrum;
pub mod weight;
pub mod window;

pub use analyze::{find_aks, FrameAnalysis};
pub use autocorr::autocorrelate;
pub use emphasis::{de_emp, pre_emp, DeEmphasis, PreEmphasis};
pub use filter::{inverse_filter, inverse_filter_history, synthesis_filter, synthesis_filter_history};
pub use history::HistoryBuffer;
pub use levinson::levinson_durbin;
pub use spectrum::{lpc_power_spectrum, power_to_db};
pub use weight::weight;
pub use window::hanning_window;
