/// An RPC call, as seen by the transport
///
/// The transport uses this to route the request and to pick an encoding.
pub trait Call {
    /// RPC method name
    fn name(&self) -> &'static str;

    fn table(&self) -> &[u8];

    fn key(&self) -> &[u8];

    /// Returns `true` if the call must not be coalesced into a multi-row batch
    fn skip_batch(&self) -> bool;

    /// Returns `false` if cell data must be sent inline in the protobuf message
    /// instead of in a cellblock
    fn cell_blocks_enabled(&self) -> bool;
}
