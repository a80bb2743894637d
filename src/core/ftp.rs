// src/core/ftp.rs
// Plain FTP client over TCP (std-only): passive mode, binary STOR.

use std::{
    io::{BufRead, BufReader, Write},
    net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs},
    time::Duration,
};

use tracing::debug;

use crate::error::TransferError;

/// One server reply: status code plus the (last) text line.
#[derive(Debug, Clone)]
pub struct Reply {
    pub code: u16,
    pub text: String,
}

impl Reply {
    fn is(&self, codes: &[u16]) -> bool { codes.contains(&self.code) }
}

pub struct FtpSession {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer: IpAddr,
    timeout: Duration,
}

impl FtpSession {
    /// Connect and consume the 220 greeting.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, TransferError> {
        let connect_err = |source| TransferError::Connect { host: s!(host), source };

        let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs().map_err(connect_err)?.collect();
        let mut last = std::io::Error::new(std::io::ErrorKind::NotFound, "no address resolved");
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(s) => { stream = Some(s); break; }
                Err(e) => last = e,
            }
        }
        let stream = stream.ok_or_else(|| connect_err(last))?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;

        let peer = stream.peer_addr()?.ip();
        let writer = stream.try_clone()?;
        let mut session = Self { reader: BufReader::new(stream), writer, peer, timeout };

        let hello = session.read_reply()?;
        if !hello.is(&[220]) {
            return Err(TransferError::Protocol { command: s!("connect"), reply: hello.text });
        }
        Ok(session)
    }

    /// Read one (possibly multi-line) reply.
    fn read_reply(&mut self) -> Result<Reply, TransferError> {
        let mut line = s!();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(TransferError::Protocol { command: s!("read"), reply: s!("connection closed") });
        }
        let code = parse_code(&line).ok_or_else(|| TransferError::Protocol {
            command: s!("read"),
            reply: line.trim_end().to_string(),
        })?;

        // "123-first line" … "123 last line"
        if line.as_bytes().get(3) == Some(&b'-') {
            let end = format!("{code} ");
            loop {
                line.clear();
                if self.reader.read_line(&mut line)? == 0 { break; }
                if line.starts_with(&end) { break; }
            }
        }
        let text = line.trim_end().to_string();
        debug!(code, reply = %text, "ftp <");
        Ok(Reply { code, text })
    }

    pub fn command(&mut self, cmd: &str) -> Result<Reply, TransferError> {
        let shown = if cmd.starts_with("PASS ") { "PASS ****" } else { cmd };
        debug!("ftp > {shown}");
        self.writer.write_all(cmd.as_bytes())?;
        self.writer.write_all(b"\r\n")?;
        self.writer.flush()?;
        self.read_reply()
    }

    pub fn login(&mut self, user: &str, pass: &str) -> Result<(), TransferError> {
        let reply = self.command(&join!("USER ", user))?;
        let reply = if reply.is(&[331, 332]) { self.command(&join!("PASS ", pass))? } else { reply };
        if reply.is(&[230, 202]) {
            Ok(())
        } else {
            Err(TransferError::Login { user: s!(user) })
        }
    }

    /// Walk `remote_path` segment by segment from the login directory,
    /// creating segments that do not exist yet. A leading `/` does not change
    /// to the server root, and `/` alone stays where login left us.
    pub fn enter_dir(&mut self, remote_path: &str) -> Result<(), TransferError> {
        for seg in remote_path.split('/').filter(|p| !p.is_empty()) {
            let cwd = join!("CWD ", seg);
            if self.command(&cwd)?.is(&[250]) {
                continue;
            }
            let made = self.command(&join!("MKD ", seg))?;
            if !made.is(&[257]) {
                return Err(TransferError::CreateDir { dir: s!(seg), reply: made.text });
            }
            let entered = self.command(&cwd)?;
            if !entered.is(&[250]) {
                return Err(TransferError::Protocol { command: cwd, reply: entered.text });
            }
        }
        Ok(())
    }

    /// Store `bytes` as `name` in the current remote directory.
    pub fn put(&mut self, name: &str, bytes: &[u8]) -> Result<(), TransferError> {
        let typed = self.command("TYPE I")?;
        if !typed.is(&[200]) {
            return Err(TransferError::Protocol { command: s!("TYPE I"), reply: typed.text });
        }

        let pasv = self.command("PASV")?;
        let port = match (pasv.is(&[227]), parse_pasv_port(&pasv.text)) {
            (true, Some(p)) => p,
            _ => return Err(TransferError::Protocol { command: s!("PASV"), reply: pasv.text }),
        };
        // Use the control peer address: servers behind NAT advertise private IPs.
        let mut data = TcpStream::connect_timeout(&SocketAddr::new(self.peer, port), self.timeout)?;
        data.set_write_timeout(Some(self.timeout))?;

        let started = self.command(&join!("STOR ", name))?;
        if !started.is(&[125, 150]) {
            return Err(TransferError::Put { reply: started.text });
        }
        data.write_all(bytes)?;
        data.flush()?;
        drop(data);

        let done = self.read_reply()?;
        if done.is(&[226, 250]) {
            Ok(())
        } else {
            Err(TransferError::Put { reply: done.text })
        }
    }

    pub fn quit(mut self) {
        // Best effort; the upload already succeeded or failed.
        let _ = self.command("QUIT");
    }
}

fn parse_code(line: &str) -> Option<u16> {
    let head = line.get(..3)?;
    if head.bytes().all(|b| b.is_ascii_digit()) { head.parse().ok() } else { None }
}

/// Port from `227 Entering Passive Mode (h1,h2,h3,h4,p1,p2)`.
fn parse_pasv_port(text: &str) -> Option<u16> {
    let open = text.find('(')?;
    let close = text[open..].find(')')? + open;
    let nums: Vec<u16> = text[open + 1..close]
        .split(',')
        .map(|n| n.trim().parse::<u16>())
        .collect::<Result<_, _>>()
        .ok()?;
    if nums.len() != 6 || nums[4] > 255 || nums[5] > 255 {
        return None;
    }
    Some(nums[4] * 256 + nums[5])
}
