//! serve サブコマンド
//!
//! ログサーバーを起動します。

use clap::Args;

/// serve サブコマンドの引数
///
/// 指定した値は環境変数由来の設定より優先される。
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, env = "LOGVAULT_PORT")]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'H', long, env = "LOGVAULT_HOST")]
    pub host: Option<String>,
}

impl ServeArgs {
    /// 引数で設定を上書きする
    pub fn apply(&self, config: &mut crate::config::ServiceConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
    }
}
