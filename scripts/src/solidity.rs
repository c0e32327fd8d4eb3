//! Definitions of Solidity functions called during deployment

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface BattleWagerToken {
        function balanceOf(address account) external view returns (uint256);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }
}
