//! OSC transport for the command stream.
//!
//! Commands travel to the receiving application (Ableton Live running
//! AbletonOSC) as individual UDP datagrams, fire-and-forget: no
//! acknowledgment, no retry, no timeout. The two-phase create/fill
//! protocol only works because commands are submitted strictly in program
//! order, one datagram per command.

use std::net::UdpSocket;
use std::sync::Arc;

use rosc::{encoder, OscMessage, OscPacket, OscType};

use crate::error::Result;
use crate::sequence::LiveCommand;

/// AbletonOSC address for the tempo command.
pub const ADDR_SET_TEMPO: &str = "/live/song/set/tempo";
/// AbletonOSC address for clip deletion.
pub const ADDR_DELETE_CLIP: &str = "/live/clip_slot/delete_clip";
/// AbletonOSC address for clip creation.
pub const ADDR_CREATE_CLIP: &str = "/live/clip_slot/create_clip";
/// AbletonOSC address for note insertion.
pub const ADDR_ADD_NOTE: &str = "/live/clip/add/notes";

/// Encode a command as the OSC message the receiver expects.
pub fn message(command: &LiveCommand) -> OscMessage {
    match *command {
        LiveCommand::SetTempo { tempo } => OscMessage {
            addr: ADDR_SET_TEMPO.to_string(),
            args: vec![OscType::Int(tempo)],
        },
        LiveCommand::DeleteClip { track, clip } => OscMessage {
            addr: ADDR_DELETE_CLIP.to_string(),
            args: vec![OscType::Int(track), OscType::Int(clip)],
        },
        LiveCommand::CreateClip { track, clip, length } => OscMessage {
            addr: ADDR_CREATE_CLIP.to_string(),
            args: vec![
                OscType::Int(track),
                OscType::Int(clip),
                OscType::Float(length as f32),
            ],
        },
        LiveCommand::AddNote {
            track,
            clip,
            pitch,
            start,
            duration,
            velocity,
            mute,
        } => OscMessage {
            addr: ADDR_ADD_NOTE.to_string(),
            args: vec![
                OscType::Int(track),
                OscType::Int(clip),
                OscType::Int(pitch),
                OscType::Float(start as f32),
                OscType::Float(duration as f32),
                OscType::Int(velocity),
                OscType::Int(mute),
            ],
        },
    }
}

/// UDP-based OSC client for sending commands to the receiver.
#[derive(Clone)]
pub struct OscClient {
    /// The underlying UDP socket (None in noop mode).
    sock: Option<Arc<UdpSocket>>,
    /// Target address in "host:port" format.
    pub addr: String,
}

impl OscClient {
    /// Create a new client targeting the given "host:port" address,
    /// bound to an ephemeral local port.
    pub fn new<A: Into<String>>(addr: A) -> Result<Self> {
        let sock = UdpSocket::bind("0.0.0.0:0")?;
        Ok(Self {
            sock: Some(Arc::new(sock)),
            addr: addr.into(),
        })
    }

    /// Create a no-op client for dry runs and validation.
    ///
    /// All send operations succeed without touching the network; the
    /// commands are logged instead.
    pub fn noop() -> Self {
        Self {
            sock: None,
            addr: "noop".to_string(),
        }
    }

    /// Check if this client is in noop mode.
    pub fn is_noop(&self) -> bool {
        self.sock.is_none()
    }

    /// Encode and send one command as a single datagram.
    pub fn send_command(&self, command: &LiveCommand) -> Result<()> {
        let msg = message(command);
        let sock = match &self.sock {
            Some(s) => s,
            None => {
                log::info!("[OSC] (noop) {} {:?}", msg.addr, msg.args);
                return Ok(());
            }
        };
        let buf = encoder::encode(&OscPacket::Message(msg))?;
        sock.send_to(&buf, &self.addr)?;
        Ok(())
    }

    /// Send a command stream in submission order.
    pub fn send_all(&self, commands: &[LiveCommand]) -> Result<()> {
        for command in commands {
            self.send_command(command)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for OscClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OscClient")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}
