mod error;
pub use error::{ExecError, ExecResult};

mod runner;
pub use runner::Runner;

mod util;

#[cfg(feature = "proc")]
pub mod proc;
#[cfg(feature = "proc")]
pub use proc::{ProcConfig, ProcRunner};

pub mod prelude {
    pub use crate::Runner;
    pub use crate::error::{ExecError, ExecResult};
    #[cfg(feature = "proc")]
    pub use crate::proc::{ProcConfig, ProcRunner};
}
