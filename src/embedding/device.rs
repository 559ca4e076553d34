use candle_core::Device;
use tracing::{debug, warn};

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::info;

use super::error::EmbeddingError;

/// Selects the compute device for a model load.
///
/// With `prefer_gpu` unset, or when no GPU backend is compiled in, this is
/// always [`Device::Cpu`]. GPU failures fall back to CPU with a warning.
pub fn select_device(prefer_gpu: bool) -> Result<Device, EmbeddingError> {
    if !prefer_gpu {
        debug!("GPU not requested, using CPU device");
        return Ok(Device::Cpu);
    }

    #[allow(unused_mut)]
    let mut failures: Vec<String> = Vec::new();

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Using Metal GPU acceleration");
                return Ok(device);
            }
            Err(e) => failures.push(format!("metal failed: {e}")),
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Using CUDA GPU acceleration");
                return Ok(device);
            }
            Err(e) => failures.push(format!("cuda failed: {e}")),
        }
    }

    let reason = if !cfg!(any(feature = "metal", feature = "cuda")) {
        "no GPU backend compiled".to_string()
    } else if failures.is_empty() {
        "no GPU device available".to_string()
    } else {
        failures.join("; ")
    };

    warn!(reason = %reason, "Falling back to CPU device");
    Ok(Device::Cpu)
}
