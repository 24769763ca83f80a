use super::{MethodDescriptor, reverse_params};
use crate::format::InputFormatter::{Apply, Passthrough};
use crate::format::{input_formatters as input, output_formatters as output};
use crate::resolve::CallResolver;

/// Descriptors of the `eth` namespace. Wire names are part of the node API and must not
/// change.
pub fn eth_methods() -> Vec<MethodDescriptor> {
    vec![
        MethodDescriptor::new("getNodeInfo", "web3_clientVersion", vec![]),
        MethodDescriptor::new("getProtocolVersion", "eth_protocolVersion", vec![]),
        MethodDescriptor::new("getCoinbase", "eth_coinbase", vec![]),
        MethodDescriptor::new("isMining", "eth_mining", vec![]),
        MethodDescriptor::new("getHashrate", "eth_hashrate", vec![])
            .with_output(output::quantity_to_number),
        MethodDescriptor::new("isSyncing", "eth_syncing", vec![]).with_output(output::syncing),
        MethodDescriptor::new("getGasPrice", "eth_gasPrice", vec![])
            .with_output(output::big_number),
        MethodDescriptor::new("getMaxPriorityFeePerGas", "eth_maxPriorityFeePerGas", vec![])
            .with_output(output::big_number),
        MethodDescriptor::new(
            "getFeeHistory",
            "eth_feeHistory",
            vec![
                Apply(input::number_to_hex),
                Apply(input::block_number),
                Passthrough,
            ],
        )
        .with_output(output::fee_history),
        MethodDescriptor::new("getAccounts", "eth_accounts", vec![])
            .with_output(output::checksum_addresses),
        MethodDescriptor::new("requestAccounts", "eth_requestAccounts", vec![])
            .with_output(output::checksum_addresses),
        MethodDescriptor::new("getBlockNumber", "eth_blockNumber", vec![])
            .with_output(output::quantity_to_number),
        MethodDescriptor::new("getChainId", "eth_chainId", vec![])
            .with_output(output::quantity_to_number),
        MethodDescriptor::new(
            "getBalance",
            "eth_getBalance",
            vec![Apply(input::address), Apply(input::default_block_number)],
        )
        .with_output(output::big_number),
        MethodDescriptor::new(
            "getStorageAt",
            "eth_getStorageAt",
            vec![
                Apply(input::address),
                Apply(input::number_to_hex),
                Apply(input::default_block_number),
            ],
        ),
        MethodDescriptor::new(
            "getCode",
            "eth_getCode",
            vec![Apply(input::address), Apply(input::default_block_number)],
        ),
        MethodDescriptor::new(
            "getProof",
            "eth_getProof",
            vec![
                Apply(input::address),
                Apply(input::storage_keys),
                Apply(input::default_block_number),
            ],
        ),
        MethodDescriptor::new(
            "getBlock",
            CallResolver::by_block_shape("eth_getBlockByHash", "eth_getBlockByNumber"),
            vec![Apply(input::block_number), Apply(input::boolean)],
        )
        .with_output(output::block),
        MethodDescriptor::new(
            "getUncle",
            CallResolver::by_block_shape(
                "eth_getUncleByBlockHashAndIndex",
                "eth_getUncleByBlockNumberAndIndex",
            ),
            vec![Apply(input::block_number), Apply(input::number_to_hex)],
        )
        .with_output(output::block),
        MethodDescriptor::new(
            "getBlockTransactionCount",
            CallResolver::by_block_shape(
                "eth_getBlockTransactionCountByHash",
                "eth_getBlockTransactionCountByNumber",
            ),
            vec![Apply(input::block_number)],
        )
        .with_output(output::quantity_to_number),
        MethodDescriptor::new(
            "getBlockUncleCount",
            CallResolver::by_block_shape(
                "eth_getUncleCountByBlockHash",
                "eth_getUncleCountByBlockNumber",
            ),
            vec![Apply(input::block_number)],
        )
        .with_output(output::quantity_to_number),
        MethodDescriptor::new(
            "getTransaction",
            "eth_getTransactionByHash",
            vec![Passthrough],
        )
        .with_output(output::transaction),
        MethodDescriptor::new("getPendingTransactions", "eth_pendingTransactions", vec![])
            .with_output(output::transactions),
        MethodDescriptor::new(
            "getTransactionFromBlock",
            CallResolver::by_block_shape(
                "eth_getTransactionByBlockHashAndIndex",
                "eth_getTransactionByBlockNumberAndIndex",
            ),
            vec![Apply(input::block_number), Apply(input::number_to_hex)],
        )
        .with_output(output::transaction),
        MethodDescriptor::new(
            "getTransactionReceipt",
            "eth_getTransactionReceipt",
            vec![Passthrough],
        )
        .with_output(output::receipt),
        MethodDescriptor::new(
            "getTransactionCount",
            "eth_getTransactionCount",
            vec![Apply(input::address), Apply(input::default_block_number)],
        )
        .with_output(output::quantity_to_number),
        MethodDescriptor::new(
            "sendSignedTransaction",
            "eth_sendRawTransaction",
            vec![Passthrough],
        ),
        MethodDescriptor::new(
            "signTransaction",
            "eth_signTransaction",
            vec![Apply(input::transaction)],
        ),
        MethodDescriptor::new(
            "sendTransaction",
            "eth_sendTransaction",
            vec![Apply(input::transaction)],
        ),
        // Logical order is (message, address); the node expects (address, message).
        MethodDescriptor::new(
            "sign",
            "eth_sign",
            vec![Apply(input::sign_data), Apply(input::address)],
        )
        .with_payload_transform(reverse_params),
        MethodDescriptor::new(
            "call",
            "eth_call",
            vec![Apply(input::call), Apply(input::default_block_number)],
        ),
        MethodDescriptor::new("estimateGas", "eth_estimateGas", vec![Apply(input::call)])
            .with_output(output::quantity_to_number),
        MethodDescriptor::new(
            "submitWork",
            "eth_submitWork",
            vec![Passthrough, Passthrough, Passthrough],
        ),
        MethodDescriptor::new("getWork", "eth_getWork", vec![]),
        MethodDescriptor::new("getPastLogs", "eth_getLogs", vec![Apply(input::log_filter)])
            .with_output(output::logs),
    ]
}
