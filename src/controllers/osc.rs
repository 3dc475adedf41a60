// src/controllers/osc.rs
// OSC remote control of the flow animation

use nannou_osc as osc;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum OscCommand {
    Start,
    Stop,
    Toggle,
    SetFps(f64),
}

pub struct OscController {
    command_queue: Vec<OscCommand>,
    receiver: osc::Receiver,
}

impl OscController {
    pub fn new(port: u16) -> Result<Self, Box<dyn Error>> {
        let receiver = osc::receiver(port)?;
        tracing::info!(port, "listening for OSC");

        Ok(Self {
            command_queue: Vec::new(),
            receiver,
        })
    }

    pub fn process_messages(&mut self) {
        for (packet, _addr) in self.receiver.try_iter() {
            for message in packet.into_msgs() {
                match parse_message(&message) {
                    Some(command) => self.command_queue.push(command),
                    None => tracing::warn!(
                        addr = %message.addr,
                        args = message.args.len(),
                        "unhandled OSC message"
                    ),
                }
            }
        }
    }

    pub fn take_commands(&mut self) -> Vec<OscCommand> {
        std::mem::take(&mut self.command_queue)
    }
}

pub fn parse_message(message: &osc::Message) -> Option<OscCommand> {
    match message.addr.as_str() {
        "/flow/start" => Some(OscCommand::Start),
        "/flow/stop" => Some(OscCommand::Stop),
        "/flow/toggle" => Some(OscCommand::Toggle),
        "/flow/fps" => match &message.args[..] {
            [osc::Type::Float(fps)] => Some(OscCommand::SetFps(*fps as f64)),
            [osc::Type::Double(fps)] => Some(OscCommand::SetFps(*fps)),
            [osc::Type::Int(fps)] => Some(OscCommand::SetFps(*fps as f64)),
            _ => None,
        },
        _ => None,
    }
}
