//! Well-known store paths in a recorded trajectory.

/// Group holding the raw and derived action arrays.
pub const ACTION_GROUP: &str = "action";

/// Dataset whose leading dimension defines the episode length.
pub const CARTESIAN_POSITION: &str = "action/cartesian_position";

/// Group holding one integer-coded dataset per raw camera identifier.
pub const CAMERA_TYPE_GROUP: &str = "observation/camera_type";

/// Group the converted per-slot image stacks are written under.
pub const IMAGE_GROUP: &str = "observation/camera/image";

/// Boolean per-timestep flag; `false` marks an idle timestep.
pub const MOVEMENT_ENABLED: &str = "observation/controller_info/movement_enabled";
