use std::io::{self, Read, Write};
use std::net::TcpStream;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use serde_json::{json, Value};

use crate::error::MazeError;
use crate::grids::Cell;

/// Block palettes the world service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Floor,
    Wall,
    Marker,
}

impl BlockKind {
    pub fn block_id(self) -> u8 {
        match self {
            BlockKind::Wall => 0,
            BlockKind::Floor => 4,
            BlockKind::Marker => 6,
        }
    }

    // walls and markers sit one layer above the floor plane
    fn layer(self) -> i32 {
        match self {
            BlockKind::Floor => 0,
            BlockKind::Wall | BlockKind::Marker => 1,
        }
    }
}

/// The voxel-world boundary. Each call blocks until the remote side acks,
/// and calls land in the world in exactly the order they are issued.
pub trait BlockRenderer {
    fn place_block(&mut self, cell: Cell, kind: BlockKind) -> Result<(), MazeError>;
    fn clear_region(&mut self, min: Cell, max: Cell) -> Result<(), MazeError>;
}

/// Where the maze plane sits in the world.
#[derive(Debug, Clone, Copy)]
pub struct WorldOffset {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Default for WorldOffset {
    fn default() -> Self {
        // lifted off the world floor so the maze is visible from spawn
        Self { x: 0, y: 10, z: 0 }
    }
}

/// Request/ack client for the world service: one length-framed JSON message
/// per operation, one ack frame back.
pub struct VoxelClient<S> {
    stream: S,
    offset: WorldOffset,
}

impl VoxelClient<TcpStream> {
    pub fn connect(addr: &str) -> Result<Self, MazeError> {
        let stream = TcpStream::connect(addr)?;
        Ok(Self::new(stream, WorldOffset::default()))
    }
}

impl<S: Read + Write> VoxelClient<S> {
    pub fn new(stream: S, offset: WorldOffset) -> Self {
        Self { stream, offset }
    }

    fn request(&mut self, message: &Value) -> Result<(), MazeError> {
        send_message(&mut self.stream, &message.to_string())?;
        let reply = receive_message(&mut self.stream)?;
        match serde_json::from_str::<Value>(&reply) {
            Ok(ack) => {
                if let Some(reason) = ack.get("Error").and_then(Value::as_str) {
                    return Err(MazeError::Rejected(reason.to_string()));
                }
                Ok(())
            }
            // some builds of the service ack with a bare token
            Err(_) => Ok(()),
        }
    }
}

impl<S: Read + Write> BlockRenderer for VoxelClient<S> {
    fn place_block(&mut self, cell: Cell, kind: BlockKind) -> Result<(), MazeError> {
        debug!("place {:?} at {:?}", kind, cell);
        self.request(&json!({
            "AddCube": {
                "x": cell.0 + self.offset.x,
                "y": cell.1 + self.offset.y,
                "z": self.offset.z + kind.layer(),
                "block": kind.block_id(),
            }
        }))
    }

    fn clear_region(&mut self, min: Cell, max: Cell) -> Result<(), MazeError> {
        debug!("clear {:?} through {:?}", min, max);
        // upper corner is exclusive; span both layers
        self.request(&json!({
            "ClearBox": {
                "x1": min.0 + self.offset.x,
                "y1": min.1 + self.offset.y,
                "z1": self.offset.z,
                "x2": max.0 + self.offset.x + 1,
                "y2": max.1 + self.offset.y + 1,
                "z2": self.offset.z + 2,
            }
        }))
    }
}

pub fn send_message<W: Write>(stream: &mut W, message: &str) -> io::Result<()> {
    stream.write_u32::<LittleEndian>(message.len() as u32)?;
    stream.write_all(message.as_bytes())?;
    stream.flush()
}

pub fn receive_message<R: Read>(stream: &mut R) -> io::Result<String> {
    let size = stream.read_u32::<LittleEndian>()?;
    let mut buffer = vec![0; size as usize];
    stream.read_exact(&mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("bad reply: {}", e)))
}
