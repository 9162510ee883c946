/// INTERNAL
/// Used to generate the ControlMessage enum type and the `CtrlMessage`
/// impls of every listed body type. The enum is what the dispatcher
/// decodes into.
macro_rules! define_control_messages {
    (
        $(
            $name:ident,
        )+
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ControlMessage {
            $(
                $name($name),
            )+
        }

        impl ControlMessage {
            /// Peeks the id byte and decodes the matching variant.
            pub fn decode(src: &mut ByteCursor<'_>, we_are_a_client: bool) -> Result<Self, DecodeError> {
                let id = src.peek_u8().ok_or(DecodeError::UnexpectedEof)?;
                Ok(match id {
                    $(
                        <$name as ControlBody>::ID => {
                            ControlMessage::$name(<$name as ControlBody>::decode(src, we_are_a_client)?)
                        }
                    )+
                    other => return Err(DecodeError::UnknownControlId(other)),
                })
            }

            pub fn id(&self) -> u8 {
                match self {
                    $(
                        ControlMessage::$name(_inner) => <$name as ControlBody>::ID,
                    )+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        ControlMessage::$name(_inner) => <$name as ControlBody>::NAME,
                    )+
                }
            }

            pub fn encode(&self, dst: &mut impl BufMut, we_are_a_client: bool) {
                match self {
                    $(
                        ControlMessage::$name(inner) => inner.encode(dst, we_are_a_client),
                    )+
                }
            }
        }

        impl CtrlMessage for ControlMessage {
            fn message_name(&self) -> &str {
                self.name()
            }

            fn message_id(&self) -> u8 {
                self.id()
            }

            fn pack(&self, we_are_a_client: bool) -> Vec<u8> {
                let mut buf = BytesMut::new();
                self.encode(&mut buf, we_are_a_client);
                buf.to_vec()
            }

            fn unpack(&mut self, data: &[u8], we_are_a_client: bool) -> bool {
                match ControlMessage::decode(&mut ByteCursor::new(data), we_are_a_client) {
                    Ok(msg) => {
                        *self = msg;
                        true
                    }
                    Err(error) => {
                        tracing::trace!(%error, we_are_a_client, "rejected control message");
                        false
                    }
                }
            }
        }

        $(
            impl From<$name> for ControlMessage {
                fn from(inner: $name) -> Self {
                    ControlMessage::$name(inner)
                }
            }

            impl CtrlMessage for $name {
                fn message_name(&self) -> &str {
                    <$name as ControlBody>::NAME
                }

                fn message_id(&self) -> u8 {
                    <$name as ControlBody>::ID
                }

                fn pack(&self, we_are_a_client: bool) -> Vec<u8> {
                    let mut buf = BytesMut::new();
                    self.encode(&mut buf, we_are_a_client);
                    buf.to_vec()
                }

                fn unpack(&mut self, data: &[u8], we_are_a_client: bool) -> bool {
                    match <$name as ControlBody>::decode(&mut ByteCursor::new(data), we_are_a_client) {
                        Ok(msg) => {
                            *self = msg;
                            true
                        }
                        Err(error) => {
                            tracing::trace!(
                                name = <$name as ControlBody>::NAME,
                                %error,
                                we_are_a_client,
                                "rejected control message"
                            );
                            false
                        }
                    }
                }
            }
        )+
    }
}
pub(crate) use define_control_messages;

/// INTERNAL
/// Same as `define_control_messages` for system and game messages. Ids
/// this crate does not model decode to `GameMessage::Unknown` so the
/// caller can still forward or count them.
macro_rules! define_game_messages {
    (
        $(
            $name:ident,
        )+
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum GameMessage {
            $(
                $name($name),
            )+
            Unknown { id: i32, system: bool, payload: Bytes },
        }

        impl GameMessage {
            pub fn decode(src: &mut ByteCursor<'_>) -> Result<Self, DecodeError> {
                let (id, system) = read_message_header(src)?;
                Ok(match (system, id) {
                    $(
                        (<$name as MessageBody>::SYSTEM, <$name as MessageBody>::ID) => {
                            let msg = <$name as MessageBody>::decode_body(src)?;
                            src.finish()?;
                            GameMessage::$name(msg)
                        }
                    )+
                    (system, id) => GameMessage::Unknown {
                        id,
                        system,
                        payload: Bytes::copy_from_slice(src.read_rest()),
                    },
                })
            }

            pub fn id(&self) -> i32 {
                match self {
                    $(
                        GameMessage::$name(_inner) => <$name as MessageBody>::ID,
                    )+
                    GameMessage::Unknown { id, .. } => *id,
                }
            }

            pub fn is_system(&self) -> bool {
                match self {
                    $(
                        GameMessage::$name(_inner) => <$name as MessageBody>::SYSTEM,
                    )+
                    GameMessage::Unknown { system, .. } => *system,
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        GameMessage::$name(_inner) => <$name as MessageBody>::NAME,
                    )+
                    GameMessage::Unknown { .. } => "unknown",
                }
            }

            pub fn is_unknown(&self) -> bool {
                matches!(self, GameMessage::Unknown { .. })
            }

            pub fn encode(&self, dst: &mut impl BufMut) {
                match self {
                    $(
                        GameMessage::$name(inner) => inner.encode(dst),
                    )+
                    GameMessage::Unknown { id, system, payload } => {
                        varint::encode(message_header(*id, *system), dst);
                        dst.put_slice(payload);
                    }
                }
            }
        }

        impl NetMessage for GameMessage {
            fn message_type(&self) -> &'static str {
                if self.is_system() { "system" } else { "game" }
            }

            fn message_name(&self) -> &str {
                self.name()
            }

            fn message_id(&self) -> i32 {
                self.id()
            }

            fn is_system(&self) -> bool {
                GameMessage::is_system(self)
            }

            fn pack(&self) -> Vec<u8> {
                let mut buf = BytesMut::new();
                self.encode(&mut buf);
                buf.to_vec()
            }

            fn unpack(&mut self, data: &[u8]) -> bool {
                match GameMessage::decode(&mut ByteCursor::new(data)) {
                    Ok(msg) => {
                        *self = msg;
                        true
                    }
                    Err(error) => {
                        tracing::trace!(%error, "rejected game message");
                        false
                    }
                }
            }
        }

        $(
            impl From<$name> for GameMessage {
                fn from(inner: $name) -> Self {
                    GameMessage::$name(inner)
                }
            }

            impl NetMessage for $name {
                fn message_type(&self) -> &'static str {
                    if <$name as MessageBody>::SYSTEM { "system" } else { "game" }
                }

                fn message_name(&self) -> &str {
                    <$name as MessageBody>::NAME
                }

                fn message_id(&self) -> i32 {
                    <$name as MessageBody>::ID
                }

                fn is_system(&self) -> bool {
                    <$name as MessageBody>::SYSTEM
                }

                fn pack(&self) -> Vec<u8> {
                    let mut buf = BytesMut::new();
                    self.encode(&mut buf);
                    buf.to_vec()
                }

                fn unpack(&mut self, data: &[u8]) -> bool {
                    match <$name as MessageBody>::decode(&mut ByteCursor::new(data)) {
                        Ok(msg) => {
                            *self = msg;
                            true
                        }
                        Err(error) => {
                            tracing::trace!(
                                name = <$name as MessageBody>::NAME,
                                %error,
                                "rejected game message"
                            );
                            false
                        }
                    }
                }
            }
        )+
    }
}
pub(crate) use define_game_messages;
