#[path = "kernels/connectivity.rs"]
mod connectivity;
#[path = "kernels/raster_modes.rs"]
mod raster_modes;
