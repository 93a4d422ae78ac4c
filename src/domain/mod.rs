// Domain layer: 資料模型與 ports (介面)。除了 serde 以外不依賴外部 crate。

pub mod model;
pub mod ports;
