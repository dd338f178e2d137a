/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::net::UdpSocket;
#[cfg(unix)]
use std::os::unix::net::UnixDatagram;

mod buf;
pub(crate) use buf::SinkBuf;

#[cfg(test)]
pub(crate) use test::TestPackets;
#[cfg(test)]
use test::TestMetricsSink;

/// Sockets are connected to the peer on build, so refused sends surface as errors.
enum MetricsSinkIo {
    #[cfg(test)]
    Test(TestMetricsSink),
    Udp(UdpSocket),
    #[cfg(unix)]
    Unix(UnixDatagram),
}

impl MetricsSinkIo {
    fn send_msg(&self, msg: &[u8]) -> io::Result<usize> {
        match self {
            #[cfg(test)]
            MetricsSinkIo::Test(s) => s.send_msg(msg),
            MetricsSinkIo::Udp(s) => s.send(msg),
            #[cfg(unix)]
            MetricsSinkIo::Unix(s) => s.send(msg),
        }
    }
}

pub(crate) struct StatsdMetricsSink {
    max_segment_size: usize,
    io: MetricsSinkIo,
}

impl StatsdMetricsSink {
    #[cfg(test)]
    pub(crate) fn test(packets: TestPackets, max_segment_size: usize) -> Self {
        StatsdMetricsSink {
            max_segment_size,
            io: MetricsSinkIo::Test(TestMetricsSink::new(packets)),
        }
    }

    pub(crate) fn udp(socket: UdpSocket, max_segment_size: usize) -> Self {
        StatsdMetricsSink {
            max_segment_size,
            io: MetricsSinkIo::Udp(socket),
        }
    }

    #[cfg(unix)]
    pub(crate) fn unix(socket: UnixDatagram, max_segment_size: usize) -> Self {
        StatsdMetricsSink {
            max_segment_size,
            io: MetricsSinkIo::Unix(socket),
        }
    }

    /// Send all buffered lines, packed into as few datagrams as the segment size allows.
    ///
    /// Returns the number of datagrams sent. Stops at the first failed send.
    pub(crate) fn send_batch(&self, buf: &SinkBuf) -> io::Result<usize> {
        let mut sent = 0;
        for packet in buf.packets(self.max_segment_size) {
            self.io.send_msg(packet)?;
            sent += 1;
        }
        Ok(sent)
    }
}
