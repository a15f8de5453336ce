//! Zoom-dependent visibility classes for overlay labels
use serde::Serialize;

/// Zoom level at which the map switches from overview to detail labelling
pub const DETAIL_ZOOM: f64 = 16.0;

/// Visibility behaviour of an overlay label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelClass {
    /// Journey start and end markers, shown at every zoom
    Pinned,
    /// Per-stop board and alight labels, shown only when zoomed in
    Detail,
    /// Combined transfer labels, shown at overview zooms
    Transfer,
    /// Walking-duration labels, shown only when zoomed in
    Walk,
}

impl LabelClass {
    /// Whether a label of this class is shown at the given zoom level.
    ///
    /// Close transfers invert the detail/transfer split: their combined
    /// label stays up at every zoom and the individual board/alight labels
    /// never appear, since both would sit on the same spot.
    pub fn is_visible(self, zoom: f64, is_close_transfer: bool) -> bool {
        match self {
            LabelClass::Pinned => true,
            LabelClass::Detail => zoom >= DETAIL_ZOOM && !is_close_transfer,
            LabelClass::Transfer => zoom < DETAIL_ZOOM || is_close_transfer,
            LabelClass::Walk => zoom >= DETAIL_ZOOM,
        }
    }
}
