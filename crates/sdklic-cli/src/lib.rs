//! # sdklic-cli -- Combined License Files for SDK Packaging
//!
//! Provides the `sdklic` command-line interface. Run once per build or
//! release; for every requested binary it writes `<dest>/LICENSE_<KEY>.txt`
//! aggregating the upstream licenses the registry lists for that binary.
//!
//! ```bash
//! sdklic os=windows "files=glslangValidator;spirv-opt" arch=x86_64 dest=out
//! sdklic os=linux files=vulkaninfo arch=x86_64 dest=out regenerate_all
//! ```
//!
//! Existing documents are left alone unless `regenerate_all` is given, so
//! repeated runs are cheap and make no registry calls.

pub mod assemble;
pub mod generate;
pub mod params;
pub mod sdk;
pub mod session;

pub use assemble::DocumentAssembler;
pub use generate::{run_generate, BatchReport, GenerateError, Generator, Stage, WriteOutcome};
pub use params::{parse_param, RunParams};
pub use sdk::SdkLayout;
pub use session::RegistrySession;
