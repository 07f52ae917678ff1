/// Converts a facing bearing (0° = north, clockwise) into the SPA azimuth
/// rotation, which is measured from south. The bearing is floored to whole
/// degrees and the result is wrapped into `[0, 360)`.
pub fn facing_to_rotation(bearing: f64) -> i32 {
    (bearing.floor() + 180.0).rem_euclid(360.0) as i32
}
