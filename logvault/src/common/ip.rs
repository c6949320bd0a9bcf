//! IPアドレス正規化ユーティリティ
//!
//! 監査ログに記録するクライアントIPを文字列化する

use std::net::{IpAddr, SocketAddr};

/// 接続元アドレスが取得できない場合に記録する値
pub const UNKNOWN_CLIENT_IP: &str = "unknown";

/// IPアドレスを正規化する
///
/// IPv4-mapped IPv6（::ffff:x.x.x.x）をIPv4に変換。
/// それ以外はそのまま返す。
pub fn normalize_ip(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}

/// SocketAddrからIPアドレスを抽出し正規化する
pub fn normalize_socket_ip(addr: &SocketAddr) -> IpAddr {
    normalize_ip(addr.ip())
}

/// 監査ログ用のクライアントIP文字列を返す
pub fn client_ip_label(addr: Option<&SocketAddr>) -> String {
    addr.map(|a| normalize_socket_ip(a).to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT_IP.to_string())
}
