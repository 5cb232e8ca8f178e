// MotionStream — Network Task
//
// Wi-Fi STA bring-up, HTTP server with the embedded viewer page, and the
// WebSocket endpoint. Connected clients are tracked in a hub that doubles as
// the broadcast transport for the sampler's publisher.

use std::sync::{Arc, Mutex};

use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::http::server::ws::EspHttpWsDetachedSender;
use esp_idf_svc::http::server::{Configuration as HttpServerConfig, EspHttpServer};
use esp_idf_svc::http::Method;
use esp_idf_svc::io::Write;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::sys::EspError;
use esp_idf_svc::wifi::{
    AuthMethod, BlockingWifi, ClientConfiguration, Configuration as WifiConfig, EspWifi,
};
use esp_idf_svc::ws::FrameType;

use crate::config::*;
use crate::presence::ClientPresence;
use crate::publisher::Broadcast;

// Viewer page, baked into the image (no filesystem to mount).
const INDEX_HTML: &str = include_str!("../../assets/index.html");

// ---------------------------------------------------------------------------
// WebSocket client hub
// ---------------------------------------------------------------------------

/// Registry of live WebSocket sessions. The HTTP server's event context adds
/// and removes sessions; the sampler task broadcasts through it.
pub struct WsHub {
    sessions: Mutex<Vec<(i32, EspHttpWsDetachedSender)>>,
    presence: ClientPresence,
}

impl WsHub {
    fn new(presence: ClientPresence) -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            presence,
        }
    }

    fn attach(&self, session: i32, sender: EspHttpWsDetachedSender) {
        self.sessions.lock().unwrap().push((session, sender));
        self.presence.attach();
        log::info!("WebSocket client connected (session {session})");
    }

    fn detach(&self, session: i32) {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|(id, _)| *id != session);
        if sessions.len() < before {
            self.presence.detach();
            log::info!("WebSocket client disconnected (session {session})");
        }
    }
}

impl Broadcast for WsHub {
    fn client_count(&self) -> usize {
        self.presence.count()
    }

    /// Send one text frame to every attached client. A failing client costs
    /// only its own frame; its removal happens via the close event.
    fn broadcast(&self, frame: &str) -> anyhow::Result<()> {
        let mut sessions = self.sessions.lock().unwrap();
        for (session, sender) in sessions.iter_mut() {
            if let Err(e) = sender.send(FrameType::Text(false), frame.as_bytes()) {
                log::warn!("send to session {session} failed: {e}");
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Bring-up
// ---------------------------------------------------------------------------

/// Owns the Wi-Fi driver and HTTP server for the lifetime of the process.
pub struct NetStack {
    _wifi: BlockingWifi<EspWifi<'static>>,
    _server: EspHttpServer<'static>,
    hub: Arc<WsHub>,
}

impl NetStack {
    pub fn hub(&self) -> Arc<WsHub> {
        Arc::clone(&self.hub)
    }
}

/// Connect to the configured access point and start the HTTP/WebSocket
/// server. The returned stack must be kept alive by the caller.
pub fn start(modem: Modem, presence: ClientPresence) -> anyhow::Result<NetStack> {
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut wifi = BlockingWifi::wrap(EspWifi::new(modem, sys_loop.clone(), Some(nvs))?, sys_loop)?;
    connect_wifi(&mut wifi)?;

    let ip = wifi.wifi().sta_netif().get_ip_info()?.ip;
    log::info!("Wi-Fi connected — viewer at http://{ip}/");

    let hub = Arc::new(WsHub::new(presence));

    let mut server = EspHttpServer::new(&HttpServerConfig {
        http_port: HTTP_PORT,
        ..Default::default()
    })?;

    server.fn_handler::<anyhow::Error, _>("/", Method::Get, |req| {
        req.into_response(200, Some("OK"), &[("Content-Type", "text/html")])?
            .write_all(INDEX_HTML.as_bytes())?;
        Ok(())
    })?;

    let ws_hub = Arc::clone(&hub);
    server.ws_handler(WS_URI, move |ws| -> Result<(), EspError> {
        if ws.is_new() {
            ws_hub.attach(ws.session(), ws.create_detached_sender()?);
        } else if ws.is_closed() {
            ws_hub.detach(ws.session());
        } else {
            // Clients never send application data; drain the frame and ignore it.
            let (_frame_type, len) = ws.recv(&mut [])?;
            if len > 0 {
                let mut buf = vec![0u8; len];
                ws.recv(&mut buf)?;
            }
        }
        Ok(())
    })?;

    Ok(NetStack {
        _wifi: wifi,
        _server: server,
        hub,
    })
}

fn connect_wifi(wifi: &mut BlockingWifi<EspWifi<'static>>) -> anyhow::Result<()> {
    let config = WifiConfig::Client(ClientConfiguration {
        ssid: WIFI_SSID
            .try_into()
            .map_err(|_| anyhow::anyhow!("Wi-Fi SSID longer than 32 bytes"))?,
        password: WIFI_PASS
            .try_into()
            .map_err(|_| anyhow::anyhow!("Wi-Fi password longer than 64 bytes"))?,
        auth_method: AuthMethod::WPA2Personal,
        ..Default::default()
    });

    wifi.set_configuration(&config)?;
    wifi.start()?;
    log::info!("Connecting to Wi-Fi network '{WIFI_SSID}'…");
    wifi.connect()?;
    wifi.wait_netif_up()?;
    Ok(())
}

