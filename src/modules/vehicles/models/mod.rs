mod vehicle;

pub use vehicle::{
    Vehicle, VehicleDraft, VehicleRequest, DEFAULT_MAX_ASSESSED_VALUE, MAX_LABEL_LENGTH,
    MAX_VALUE_SCALE, MIN_LABEL_LENGTH,
};
