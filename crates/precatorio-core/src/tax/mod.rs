pub mod irpf;
pub mod pss;

pub use irpf::{calculate_irpf, IrpfInput, IrpfOutput, TaxBracket};
pub use pss::{calculate_pss, PssInput, PssOutput};
